use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use pay_core::{BandTable, BreakdownOptions, ConfigurationError, Employee, NetPayCalculator};
use rust_decimal::Decimal;
use tracing::info;

use crate::input::Prompter;
use crate::report::{self, CALCULATING, WELCOME};

/// Answers supplied up front, e.g. from the command line. Anything left as
/// `None` is asked for interactively.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub number: Option<String>,
    pub salary: Option<String>,
}

/// One calculator run over a validated band table.
#[derive(Debug)]
pub struct Session {
    table: BandTable,
    options: BreakdownOptions,
}

impl Session {
    /// Checks that `table` holds every schedule `options` needs, so a bad
    /// table is reported before the user is asked anything.
    pub fn new(
        table: BandTable,
        options: BreakdownOptions,
    ) -> Result<Self, ConfigurationError> {
        NetPayCalculator::new(&table, options)?;
        Ok(Self { table, options })
    }

    pub fn table(&self) -> &BandTable {
        &self.table
    }

    pub fn options(&self) -> BreakdownOptions {
        self.options
    }

    /// Greets, gathers the employee details, and prints the breakdown.
    pub fn run<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        preset: &EmployeeInput,
    ) -> Result<()> {
        let calculator = NetPayCalculator::new(&self.table, self.options)?;

        write!(prompter.output(), "{WELCOME}")?;

        let name = match &preset.name {
            Some(name) => {
                Employee::validate_name(name).with_context(|| format!("name '{name}'"))?;
                name.clone()
            }
            None => prompter.full_name()?,
        };
        let number = match &preset.number {
            Some(number) => Employee::parse_number(number)
                .with_context(|| format!("employee number '{number}'"))?,
            None => prompter.employee_number()?,
        };
        let salary: Decimal = match &preset.salary {
            Some(salary) => Employee::parse_salary(salary)
                .with_context(|| format!("salary '{salary}'"))?,
            None => prompter.yearly_gross_salary()?,
        };

        let employee = Employee::new(name, number, salary)?;
        info!(number = employee.number, "calculating net pay");

        write!(prompter.output(), "{CALCULATING}")?;
        let breakdown = calculator.calculate(employee.yearly_gross_salary)?;
        report::write_breakdown(prompter.output(), &employee, &breakdown)?;
        Ok(())
    }
}
