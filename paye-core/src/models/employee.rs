use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Departments an employee can be assigned to. Unknown names map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    Finance,
    HumanResources,
    Operations,
    CustomerSupport,
    Legal,
    Executive,
    Other,
}

impl Department {
    pub fn all() -> &'static [Department] {
        &[
            Department::Engineering,
            Department::Sales,
            Department::Marketing,
            Department::Finance,
            Department::HumanResources,
            Department::Operations,
            Department::CustomerSupport,
            Department::Legal,
            Department::Executive,
            Department::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Sales => "Sales",
            Self::Marketing => "Marketing",
            Self::Finance => "Finance",
            Self::HumanResources => "Human Resources",
            Self::Operations => "Operations",
            Self::CustomerSupport => "Customer Support",
            Self::Legal => "Legal",
            Self::Executive => "Executive",
            Self::Other => "Other",
        }
    }

    /// Matches a department label exactly, falling back to `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|department| department.label() == label.trim())
            .unwrap_or(Self::Other)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    #[default]
    Active,
    Inactive,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// An employee on the payroll. Owned by the caller; the engine only fills in
/// the two tax fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// National identification number, 11 digits when present.
    pub nin: Option<String>,
    pub department: Department,
    pub monthly_salary: Money,
    pub annual_rent: Money,
    pub monthly_tax: Money,
    pub annual_tax: Money,
    pub status: EmploymentStatus,
}

impl Employee {
    /// A new active employee with no tax computed yet.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        monthly_salary: Money,
        annual_rent: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nin: None,
            department: Department::Other,
            monthly_salary,
            annual_rent,
            monthly_tax: Money::ZERO,
            annual_tax: Money::ZERO,
            status: EmploymentStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }
}

/// Tax withheld for one employee under a given policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTax {
    pub monthly_tax: Money,
    pub annual_tax: Money,
}
