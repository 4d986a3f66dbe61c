//! Payroll aggregation: the progressive evaluator applied once per employee.
//!
//! Every employee is evaluated and listed; only active employees count
//! towards organisation totals and department analytics. Each evaluation is
//! independent of the others.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::PayrollAggregator;
//! use paye_core::{Employee, EmploymentStatus, LawVersion, Money, TaxPolicy};
//!
//! let mut on_leave = Employee::new("EMP-0002", "Tunde", Money::new(dec!(400000)), Money::ZERO);
//! on_leave.status = EmploymentStatus::Inactive;
//! let employees = vec![
//!     Employee::new("EMP-0001", "Amaka", Money::new(dec!(250000)), Money::ZERO),
//!     on_leave,
//! ];
//!
//! let policy = TaxPolicy::for_version(LawVersion::Y2026);
//! let summary = PayrollAggregator::new(&policy).aggregate(&employees);
//!
//! assert_eq!(summary.per_employee.len(), 2);
//! assert_eq!(summary.totals.active_employees, 1);
//! assert_eq!(summary.totals.monthly_salary, Money::new(dec!(250000)));
//! ```

use std::collections::BTreeMap;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::progressive::evaluate_policy;
use crate::models::{
    Department, Employee, EmployeeTax, EmploymentStatus, LawVersion, Money, TaxBreakdown,
};
use crate::policy::TaxPolicy;

pub const MONTHS_PER_YEAR: u32 = 12;

fn average(
    total: Money,
    count: usize,
) -> Money {
    match u32::try_from(count) {
        Ok(0) => Money::ZERO,
        Ok(count) => total / count,
        Err(_) => total / u32::MAX,
    }
}

impl EmployeeTax {
    /// Annual tax is the breakdown's `tax_due`; monthly is a twelfth of it.
    pub fn from_breakdown(breakdown: &TaxBreakdown) -> Self {
        Self {
            monthly_tax: breakdown.tax_due / MONTHS_PER_YEAR,
            annual_tax: breakdown.tax_due,
        }
    }
}

/// Evaluates one employee's annualised salary and rent under `policy`.
pub fn evaluate_employee(
    monthly_salary: Money,
    annual_rent: Money,
    policy: &TaxPolicy,
) -> TaxBreakdown {
    evaluate_policy(monthly_salary * MONTHS_PER_YEAR, annual_rent, policy)
}

/// Monthly and annual tax for a salary under the current (2026) law.
pub fn recalculate_employee(
    monthly_salary: Money,
    annual_rent: Money,
) -> EmployeeTax {
    let policy = TaxPolicy::for_version(LawVersion::CURRENT);
    EmployeeTax::from_breakdown(&evaluate_employee(monthly_salary, annual_rent, &policy))
}

impl Employee {
    /// A copy of this employee with `monthly_tax` and `annual_tax` refreshed.
    pub fn recalculated(
        &self,
        policy: &TaxPolicy,
    ) -> Employee {
        let tax = EmployeeTax::from_breakdown(&evaluate_employee(
            self.monthly_salary,
            self.annual_rent,
            policy,
        ));

        Employee {
            monthly_tax: tax.monthly_tax,
            annual_tax: tax.annual_tax,
            ..self.clone()
        }
    }
}

/// One employee's evaluated position on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTaxLine {
    pub name: String,
    pub department: Department,
    pub status: EmploymentStatus,
    pub monthly_salary: Money,
    pub tax: EmployeeTax,
    pub breakdown: TaxBreakdown,
}

impl EmployeeTaxLine {
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }
}

/// Organisation-wide sums over active employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    pub active_employees: usize,
    pub monthly_salary: Money,
    pub monthly_tax: Money,
    pub annual_tax: Money,
    /// Mean monthly salary; zero with no active employees.
    pub average_salary: Money,
}

impl PayrollTotals {
    fn add(
        &mut self,
        monthly_salary: Money,
        tax: &EmployeeTax,
    ) {
        self.active_employees += 1;
        self.monthly_salary += monthly_salary;
        self.monthly_tax += tax.monthly_tax;
        self.annual_tax += tax.annual_tax;
    }
}

/// Per-department cost figures for active employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: Department,
    pub employee_count: usize,
    pub total_monthly_salary: Money,
    pub total_monthly_tax: Money,
    /// Salary plus tax.
    pub total_monthly_cost: Money,
    pub average_salary: Money,
}

/// Monthly salary bands used for cost analytics. Each tier includes its lower
/// bound and excludes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryTier {
    Under200k,
    From200kTo500k,
    From500kTo1m,
    From1m,
}

impl SalaryTier {
    pub const ALL: [SalaryTier; 4] = [
        SalaryTier::Under200k,
        SalaryTier::From200kTo500k,
        SalaryTier::From500kTo1m,
        SalaryTier::From1m,
    ];

    const LOWER_BOUNDS: [Money; 4] = [
        Money::ZERO,
        Money::new(dec!(200000)),
        Money::new(dec!(500000)),
        Money::new(dec!(1000000)),
    ];

    /// The tier for a monthly salary; `None` for negative salaries.
    pub fn for_salary(monthly_salary: Money) -> Option<Self> {
        Self::ALL
            .into_iter()
            .zip(Self::LOWER_BOUNDS)
            .rev()
            .find(|(_, lower)| monthly_salary >= *lower)
            .map(|(tier, _)| tier)
    }

    pub fn label(self) -> &'static str {
        match self {
            SalaryTier::Under200k => "< 200k",
            SalaryTier::From200kTo500k => "200k - 500k",
            SalaryTier::From500kTo1m => "500k - 1M",
            SalaryTier::From1m => ">= 1M",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryTierSummary {
    pub tier: SalaryTier,
    pub employee_count: usize,
    /// Salary plus tax.
    pub total_monthly_cost: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Every employee, active or not, keyed by id.
    pub per_employee: BTreeMap<String, EmployeeTaxLine>,
    pub totals: PayrollTotals,
}

impl PayrollSummary {
    /// Active employees grouped by department, most expensive first.
    /// Ties are broken by department name.
    pub fn by_department(&self) -> Vec<DepartmentSummary> {
        let mut departments: BTreeMap<Department, DepartmentSummary> = BTreeMap::new();

        for line in self.per_employee.values().filter(|line| line.is_active()) {
            let summary = departments
                .entry(line.department)
                .or_insert_with(|| DepartmentSummary {
                    department: line.department,
                    employee_count: 0,
                    total_monthly_salary: Money::ZERO,
                    total_monthly_tax: Money::ZERO,
                    total_monthly_cost: Money::ZERO,
                    average_salary: Money::ZERO,
                });
            summary.employee_count += 1;
            summary.total_monthly_salary += line.monthly_salary;
            summary.total_monthly_tax += line.tax.monthly_tax;
            summary.total_monthly_cost += line.monthly_salary + line.tax.monthly_tax;
        }

        let mut summaries: Vec<_> = departments
            .into_values()
            .map(|mut summary| {
                summary.average_salary =
                    average(summary.total_monthly_salary, summary.employee_count);
                summary
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.total_monthly_cost
                .cmp(&a.total_monthly_cost)
                .then_with(|| a.department.label().cmp(b.department.label()))
        });
        summaries
    }

    /// Active employees' monthly cost per salary tier, lowest tier first.
    /// Empty tiers are left out.
    pub fn by_salary_tier(&self) -> Vec<SalaryTierSummary> {
        let mut tiers = SalaryTier::ALL.map(|tier| SalaryTierSummary {
            tier,
            employee_count: 0,
            total_monthly_cost: Money::ZERO,
        });

        for line in self.per_employee.values().filter(|line| line.is_active()) {
            let Some(tier) = SalaryTier::for_salary(line.monthly_salary) else {
                continue;
            };
            let summary = &mut tiers[tier as usize];
            summary.employee_count += 1;
            summary.total_monthly_cost += line.monthly_salary + line.tax.monthly_tax;
        }

        tiers
            .into_iter()
            .filter(|summary| summary.employee_count > 0)
            .collect()
    }
}

/// Applies one tax policy across a roster.
#[derive(Debug, Clone)]
pub struct PayrollAggregator<'a> {
    policy: &'a TaxPolicy,
}

impl<'a> PayrollAggregator<'a> {
    pub fn new(policy: &'a TaxPolicy) -> Self {
        Self { policy }
    }

    /// Evaluates every employee and sums the active ones.
    ///
    /// Employee ids are expected to be unique. If one repeats, the later
    /// record replaces the earlier one in `per_employee`, but both still
    /// count towards the totals.
    pub fn aggregate(
        &self,
        employees: &[Employee],
    ) -> PayrollSummary {
        let mut summary = PayrollSummary::default();

        for employee in employees {
            let breakdown =
                evaluate_employee(employee.monthly_salary, employee.annual_rent, self.policy);
            let tax = EmployeeTax::from_breakdown(&breakdown);

            if employee.is_active() {
                summary.totals.add(employee.monthly_salary, &tax);
            }

            let line = EmployeeTaxLine {
                name: employee.name.clone(),
                department: employee.department,
                status: employee.status,
                monthly_salary: employee.monthly_salary,
                tax,
                breakdown,
            };
            if summary.per_employee.insert(employee.id.clone(), line).is_some() {
                warn!(id = %employee.id, "duplicate employee id; keeping the later record");
            }
        }
        summary.totals.average_salary =
            average(summary.totals.monthly_salary, summary.totals.active_employees);

        debug!(
            policy = %self.policy.code,
            employees = employees.len(),
            active = summary.totals.active_employees,
            annual_tax = %summary.totals.annual_tax,
            "aggregated payroll"
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    fn policy() -> TaxPolicy {
        TaxPolicy::for_version(LawVersion::Y2026)
    }

    fn employee(
        id: &str,
        department: Department,
        monthly_salary: Decimal,
        status: EmploymentStatus,
    ) -> Employee {
        Employee {
            department,
            status,
            ..Employee::new(id, format!("Employee {id}"), money(monthly_salary), Money::ZERO)
        }
    }

    // =========================================================================
    // recalculate_employee tests
    // =========================================================================

    #[test]
    fn recalculate_employee_annualises_salary() {
        // 250,000 * 12 = 3,000,000 gross
        // taxable = 3,000,000 - 240,000 - 18,750 = 2,741,250
        // tax = 120,000 + 1,141,250 * 0.18 = 325,425
        let result = recalculate_employee(money(dec!(250000)), Money::ZERO);

        assert_eq!(result.annual_tax, money(dec!(325425)));
        assert_eq!(result.monthly_tax, money(dec!(27118.75)));
    }

    #[test]
    fn recalculate_employee_below_threshold_pays_nothing() {
        let result = recalculate_employee(money(dec!(70000)), Money::ZERO);

        assert_eq!(result, EmployeeTax::default());
    }

    #[test]
    fn recalculate_employee_zero_and_negative_salary() {
        assert_eq!(
            recalculate_employee(Money::ZERO, Money::ZERO),
            EmployeeTax::default()
        );
        assert_eq!(
            recalculate_employee(money(dec!(-10000)), Money::ZERO),
            EmployeeTax::default()
        );
    }

    #[test]
    fn employee_recalculated_refreshes_only_tax_fields() {
        let original = employee(
            "EMP-1",
            Department::Finance,
            dec!(250000),
            EmploymentStatus::Active,
        );

        let updated = original.recalculated(&policy());

        assert_eq!(updated.annual_tax, money(dec!(325425)));
        assert_eq!(updated.monthly_tax, money(dec!(27118.75)));
        assert_eq!(
            Employee {
                monthly_tax: Money::ZERO,
                annual_tax: Money::ZERO,
                ..updated
            },
            original
        );
    }

    // =========================================================================
    // aggregate tests
    // =========================================================================

    #[test]
    fn aggregate_empty_roster() {
        let policy = policy();

        let summary = PayrollAggregator::new(&policy).aggregate(&[]);

        assert_eq!(summary, PayrollSummary::default());
    }

    #[test]
    fn aggregate_sums_active_employees_only() {
        let policy = policy();
        let employees = vec![
            employee("EMP-1", Department::Engineering, dec!(250000), EmploymentStatus::Active),
            employee("EMP-2", Department::Sales, dec!(70000), EmploymentStatus::Active),
            employee("EMP-3", Department::Sales, dec!(900000), EmploymentStatus::Inactive),
        ];

        let summary = PayrollAggregator::new(&policy).aggregate(&employees);

        assert_eq!(summary.per_employee.len(), 3);
        assert_eq!(
            summary.totals,
            PayrollTotals {
                active_employees: 2,
                monthly_salary: money(dec!(320000)),
                monthly_tax: money(dec!(27118.75)),
                annual_tax: money(dec!(325425)),
                average_salary: money(dec!(160000)),
            }
        );
    }

    #[test]
    fn aggregate_lists_inactive_employees_with_their_tax() {
        let policy = policy();
        let employees = vec![employee(
            "EMP-9",
            Department::Legal,
            dec!(250000),
            EmploymentStatus::Inactive,
        )];

        let summary = PayrollAggregator::new(&policy).aggregate(&employees);

        let line = &summary.per_employee["EMP-9"];
        assert!(!line.is_active());
        assert_eq!(line.tax.annual_tax, money(dec!(325425)));
        assert_eq!(summary.totals.active_employees, 0);
        assert_eq!(summary.totals.annual_tax, Money::ZERO);
        assert_eq!(summary.totals.average_salary, Money::ZERO);
    }

    #[test]
    fn aggregate_matches_individual_evaluation() {
        let policy = policy();
        let employees = vec![
            employee("A", Department::Engineering, dec!(180000), EmploymentStatus::Active),
            employee("B", Department::Finance, dec!(650000), EmploymentStatus::Active),
            employee("C", Department::Executive, dec!(2500000), EmploymentStatus::Active),
        ];

        let summary = PayrollAggregator::new(&policy).aggregate(&employees);

        let expected: Money = employees
            .iter()
            .map(|e| recalculate_employee(e.monthly_salary, e.annual_rent).annual_tax)
            .sum();
        assert_eq!(summary.totals.annual_tax, expected);
        for employee in &employees {
            assert_eq!(
                summary.per_employee[&employee.id].breakdown,
                evaluate_employee(employee.monthly_salary, employee.annual_rent, &policy)
            );
        }
    }

    #[test]
    fn aggregate_duplicate_id_keeps_later_record() {
        let policy = policy();
        let employees = vec![
            employee("EMP-1", Department::Sales, dec!(100000), EmploymentStatus::Active),
            employee("EMP-1", Department::Legal, dec!(200000), EmploymentStatus::Active),
        ];

        let summary = PayrollAggregator::new(&policy).aggregate(&employees);

        assert_eq!(summary.per_employee.len(), 1);
        assert_eq!(summary.per_employee["EMP-1"].department, Department::Legal);
        assert_eq!(summary.totals.active_employees, 2);
    }

    // =========================================================================
    // by_department tests
    // =========================================================================

    #[test]
    fn by_department_groups_and_sorts_by_cost() {
        let policy = policy();
        let employees = vec![
            employee("A", Department::Sales, dec!(70000), EmploymentStatus::Active),
            employee("B", Department::Sales, dec!(50000), EmploymentStatus::Active),
            employee("C", Department::Engineering, dec!(250000), EmploymentStatus::Active),
            employee("D", Department::Legal, dec!(900000), EmploymentStatus::Inactive),
        ];

        let summary = PayrollAggregator::new(&policy).aggregate(&employees);
        let departments = summary.by_department();

        assert_eq!(
            departments,
            vec![
                DepartmentSummary {
                    department: Department::Engineering,
                    employee_count: 1,
                    total_monthly_salary: money(dec!(250000)),
                    total_monthly_tax: money(dec!(27118.75)),
                    total_monthly_cost: money(dec!(277118.75)),
                    average_salary: money(dec!(250000)),
                },
                DepartmentSummary {
                    department: Department::Sales,
                    employee_count: 2,
                    total_monthly_salary: money(dec!(120000)),
                    total_monthly_tax: Money::ZERO,
                    total_monthly_cost: money(dec!(120000)),
                    average_salary: money(dec!(60000)),
                },
            ]
        );
    }

    #[test]
    fn by_department_breaks_ties_by_name() {
        let policy = policy();
        let employees = vec![
            employee("A", Department::Sales, dec!(50000), EmploymentStatus::Active),
            employee("B", Department::Finance, dec!(50000), EmploymentStatus::Active),
        ];

        let departments = PayrollAggregator::new(&policy)
            .aggregate(&employees)
            .by_department();

        assert_eq!(departments[0].department, Department::Finance);
        assert_eq!(departments[1].department, Department::Sales);
    }

    #[test]
    fn recalculate_employee_extreme_salary_does_not_overflow() {
        let result = recalculate_employee(money(Decimal::MAX / dec!(5)), Money::ZERO);

        assert!(result.annual_tax.is_positive());
        assert!(result.monthly_tax <= result.annual_tax);
    }

    // =========================================================================
    // by_salary_tier tests
    // =========================================================================

    #[test]
    fn salary_tier_bounds_are_half_open() {
        assert_eq!(SalaryTier::for_salary(Money::ZERO), Some(SalaryTier::Under200k));
        assert_eq!(
            SalaryTier::for_salary(money(dec!(199999.99))),
            Some(SalaryTier::Under200k)
        );
        assert_eq!(
            SalaryTier::for_salary(money(dec!(200000))),
            Some(SalaryTier::From200kTo500k)
        );
        assert_eq!(
            SalaryTier::for_salary(money(dec!(500000))),
            Some(SalaryTier::From500kTo1m)
        );
        assert_eq!(
            SalaryTier::for_salary(money(dec!(999999.99))),
            Some(SalaryTier::From500kTo1m)
        );
        assert_eq!(SalaryTier::for_salary(money(dec!(1000000))), Some(SalaryTier::From1m));
        assert_eq!(SalaryTier::for_salary(money(dec!(-1))), None);
    }

    #[test]
    fn by_salary_tier_sums_cost_and_drops_empty_tiers() {
        let policy = policy();
        let employees = vec![
            employee("A", Department::Sales, dec!(70000), EmploymentStatus::Active),
            employee("B", Department::Sales, dec!(200000), EmploymentStatus::Active),
            employee("C", Department::Engineering, dec!(250000), EmploymentStatus::Active),
            employee("D", Department::Legal, dec!(1500000), EmploymentStatus::Inactive),
        ];

        let summary = PayrollAggregator::new(&policy).aggregate(&employees);
        let tax_b = summary.per_employee["B"].tax.monthly_tax;

        assert_eq!(
            summary.by_salary_tier(),
            vec![
                SalaryTierSummary {
                    tier: SalaryTier::Under200k,
                    employee_count: 1,
                    total_monthly_cost: money(dec!(70000)),
                },
                SalaryTierSummary {
                    tier: SalaryTier::From200kTo500k,
                    employee_count: 2,
                    total_monthly_cost: money(dec!(450000)) + tax_b + money(dec!(27118.75)),
                },
            ]
        );
    }

    #[test]
    fn by_salary_tier_empty_roster() {
        let summary = PayrollSummary::default();

        assert!(summary.by_salary_tier().is_empty());
        assert_eq!(summary.totals.average_salary, Money::ZERO);
    }
}
