use std::io::{self, Write};

use pay_core::calculations::common::round_half_up;
use pay_core::{DeductionBreakdown, Employee};
use rust_decimal::Decimal;

pub const WELCOME: &str = "\nWelcome to USW Employee Salary Calculator\n";
pub const CALCULATING: &str = "\nCalculating Monthly Net Pay....\n";

/// Formats an amount in pounds to exactly two decimal places.
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", round_half_up(amount))
}

/// Writes the monthly breakdown for `employee`.
pub fn write_breakdown<W: Write>(
    out: &mut W,
    employee: &Employee,
    breakdown: &DeductionBreakdown,
) -> io::Result<()> {
    writeln!(out, "Employee: {} (#{})", employee.name, employee.number)?;
    writeln!(out, "Gross salary: {}", money(breakdown.gross_monthly))?;
    writeln!(out, "Pension deductions: {}", money(breakdown.pension_monthly))?;
    writeln!(out, "Taxable amount: {}", money(breakdown.taxable_monthly))?;
    writeln!(out, "Tax paid: {}", money(breakdown.income_tax_monthly))?;
    writeln!(out, "NI paid: {}", money(breakdown.national_insurance_monthly))?;
    writeln!(out, "Monthly parking fee: {}\n", money(breakdown.parking_monthly))?;
    writeln!(out, "Total deductions: {}", money(breakdown.total_deductions_monthly))?;
    writeln!(out, "Monthly Net Pay: {}", money(breakdown.net_monthly))?;
    out.flush()
}
