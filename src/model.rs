//! Typed records and the built-in sample datasets
//!
//! The pipelines work on polars [`DataFrame`]s so that extra source columns
//! survive a join. The record types pin down the expected columns and provide
//! the sample rows used when neither the object store nor local files are
//! available.

use eyre::{Context, Result};
use polars::prelude::*;

/// A row type with a fixed column layout
pub trait Record: Sized {
    /// Column names in output order
    const COLUMNS: &'static [&'static str];

    /// Collect records into a frame with [`COLUMNS`](Record::COLUMNS)
    fn to_frame(records: &[Self]) -> Result<DataFrame>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub emp_id: i64,
    pub name: String,
    pub department_id: i64,
}

impl Employee {
    pub fn new(emp_id: i64, name: &str, department_id: i64) -> Self {
        Self {
            emp_id,
            name: name.to_string(),
            department_id,
        }
    }
}

impl Record for Employee {
    const COLUMNS: &'static [&'static str] = &["emp_id", "name", "department_id"];

    fn to_frame(records: &[Self]) -> Result<DataFrame> {
        df!(
            Self::COLUMNS[0] => records.iter().map(|r| r.emp_id).collect::<Vec<_>>(),
            Self::COLUMNS[1] => records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            Self::COLUMNS[2] => records.iter().map(|r| r.department_id).collect::<Vec<_>>(),
        )
        .context("Failed to build employee frame")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub department_id: i64,
    pub department_name: String,
}

impl Department {
    pub fn new(department_id: i64, department_name: &str) -> Self {
        Self {
            department_id,
            department_name: department_name.to_string(),
        }
    }
}

impl Record for Department {
    const COLUMNS: &'static [&'static str] = &["department_id", "department_name"];

    fn to_frame(records: &[Self]) -> Result<DataFrame> {
        df!(
            Self::COLUMNS[0] => records.iter().map(|r| r.department_id).collect::<Vec<_>>(),
            Self::COLUMNS[1] => records.iter().map(|r| r.department_name.as_str()).collect::<Vec<_>>(),
        )
        .context("Failed to build department frame")
    }
}

/// Yearly insurance figures for one region
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    pub year: i64,
    pub region: String,
    pub total_premium: i64,
    pub total_claims: i64,
    /// Usually `total_claims / total_premium`
    pub claim_ratio: f64,
}

impl FinancialRecord {
    pub fn new(year: i64, region: &str, total_premium: i64, total_claims: i64) -> Self {
        Self {
            year,
            region: region.to_string(),
            total_premium,
            total_claims,
            claim_ratio: total_claims as f64 / total_premium as f64,
        }
    }
}

impl Record for FinancialRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Year",
        "Region",
        "TotalPremium",
        "TotalClaims",
        "ClaimRatio",
    ];

    fn to_frame(records: &[Self]) -> Result<DataFrame> {
        df!(
            Self::COLUMNS[0] => records.iter().map(|r| r.year).collect::<Vec<_>>(),
            Self::COLUMNS[1] => records.iter().map(|r| r.region.as_str()).collect::<Vec<_>>(),
            Self::COLUMNS[2] => records.iter().map(|r| r.total_premium).collect::<Vec<_>>(),
            Self::COLUMNS[3] => records.iter().map(|r| r.total_claims).collect::<Vec<_>>(),
            Self::COLUMNS[4] => records.iter().map(|r| r.claim_ratio).collect::<Vec<_>>(),
        )
        .context("Failed to build financial frame")
    }
}

/// Logical dataset names understood by [`sample_table`]
pub mod dataset {
    pub const DEPARTMENTS: &str = "departments";
    pub const EMPLOYEES: &str = "employees";
    pub const FINANCIAL: &str = "financial";
}

pub fn sample_departments() -> Vec<Department> {
    vec![
        Department::new(1, "Engineering"),
        Department::new(2, "Marketing"),
        Department::new(3, "HR"),
    ]
}

pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new(101, "Alice Smith", 1),
        Employee::new(102, "Bob Johnson", 2),
        Employee::new(103, "Charlie Lee", 1),
        Employee::new(104, "Diana Gomez", 3),
    ]
}

pub fn sample_financial_records() -> Vec<FinancialRecord> {
    [
        (2020, "North", 500_000, 300_000),
        (2020, "South", 450_000, 270_000),
        (2020, "East", 400_000, 240_000),
        (2020, "West", 550_000, 330_000),
        (2021, "North", 520_000, 312_000),
        (2021, "South", 470_000, 282_000),
        (2021, "East", 420_000, 252_000),
        (2021, "West", 580_000, 348_000),
    ]
    .into_iter()
    .map(|(year, region, premium, claims)| FinancialRecord::new(year, region, premium, claims))
    .collect()
}

/// Built-in sample rows for a logical dataset name
pub fn sample_table(name: &str) -> Result<DataFrame> {
    match name {
        dataset::DEPARTMENTS => Department::to_frame(&sample_departments()),
        dataset::EMPLOYEES => Employee::to_frame(&sample_employees()),
        dataset::FINANCIAL => FinancialRecord::to_frame(&sample_financial_records()),
        other => eyre::bail!("No sample data for dataset '{}'", other),
    }
}
