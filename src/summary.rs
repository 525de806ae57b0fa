//! Order summary
//!
//! The text form of the order summary widget: a table of cart lines followed
//! by the subtotal / delivery / total block and the free-delivery note. The
//! widget consumes a precomputed [`OrderTotals`] snapshot; it never derives
//! values of its own beyond per-line amounts.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{OrderTotals, TotalsError, line_total},
    shipping::{ShippingError, ShippingPolicy},
};

/// Errors that can occur when rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating a per-line amount.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// Error consulting the delivery policy for the free-delivery note.
    #[error(transparent)]
    Shipping(#[from] ShippingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Order summary widget for one cart snapshot.
#[derive(Debug)]
pub struct OrderSummary<'a> {
    cart: &'a Cart<'a>,
    totals: &'a OrderTotals<'a>,
    policy: &'a ShippingPolicy<'a>,
}

impl<'a> OrderSummary<'a> {
    /// Create a summary over a cart, its precomputed totals and the policy
    /// the totals were derived with.
    #[must_use]
    pub fn new(
        cart: &'a Cart<'a>,
        totals: &'a OrderTotals<'a>,
        policy: &'a ShippingPolicy<'a>,
    ) -> Self {
        Self {
            cart,
            totals,
            policy,
        }
    }

    /// Render the summary.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if a per-line amount cannot be computed,
    /// the delivery note cannot be derived, or the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Unit Price", "Qty", "Amount"]);

        let mut line_boundary_rows: SmallVec<[usize; 16]> = smallvec![];

        for (line_idx, line) in self.cart.iter().enumerate() {
            let amount = line_total(line)?;

            line_boundary_rows.push(line_idx + 1);

            builder.push_record([
                format!("#{:<3}", line_idx + 1),
                line.name().to_string(),
                format!("{}", line.unit_price()),
                format!("{}", line.quantity()),
                format!("{amount}"),
            ]);
        }

        write_summary_table(&mut out, builder, &line_boundary_rows, self.cart.len())?;
        self.write_totals_block(&mut out)?;
        self.write_delivery_note(&mut out)?;

        Ok(())
    }

    fn write_totals_block(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let subtotal_label = " Subtotal:";
        let delivery_label = " Delivery:";
        let total_label = " \x1b[1mTotal:\x1b[0m";

        let subtotal_val = format!("{}  ", self.totals.subtotal());

        let delivery_val = if self.totals.free_shipping() {
            "free  ".to_string()
        } else {
            format!("{}  ", self.totals.shipping())
        };

        let total_val = format!("{}  ", self.totals.total());

        let label_width = visible_width(subtotal_label)
            .max(visible_width(delivery_label))
            .max(visible_width(total_label));

        let value_width = subtotal_val
            .len()
            .max(delivery_val.len())
            .max(total_val.len());

        write_summary_line(out, subtotal_label, &subtotal_val, label_width, value_width)?;
        write_summary_line(out, delivery_label, &delivery_val, label_width, value_width)?;

        write_summary_line(
            out,
            total_label,
            &format!("\x1b[1m{total_val}\x1b[0m"),
            label_width,
            value_width,
        )?;

        writeln!(out).map_err(|_err| SummaryError::IO)
    }

    fn write_delivery_note(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        if self.totals.free_shipping() {
            return writeln!(out, " Free delivery unlocked.").map_err(|_err| SummaryError::IO);
        }

        let subtotal = self.totals.subtotal();
        let remaining = self.policy.remaining_for_free(&subtotal)?;
        let progress = self.policy.progress_toward_free(&subtotal)?;
        let progress_points = percent_points(progress);

        writeln!(
            out,
            " Spend {remaining} more for free delivery ({progress_points}% there)."
        )
        .map_err(|_err| SummaryError::IO)
    }
}

fn write_summary_table(
    out: &mut impl io::Write,
    builder: Builder,
    line_boundary_rows: &[usize],
    line_count: usize,
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for &row in line_boundary_rows {
        if row > 1 {
            theme.insert_horizontal_line(row, separator);
        }
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    for row in 1..=line_count {
        table.modify((row, 0), color_dark_grey());
    }

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

/// Converts a fractional percentage to whole percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.45), so multiply by 100 to print
    // percent points.
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0_usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a block line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), SummaryError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| SummaryError::IO)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
