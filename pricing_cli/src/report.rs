//! Text and JSON rendering of a computed quote.
//!
//! All rounding to whole currency units happens here.

use std::fmt::{self, Write};

use serde::Serialize;

use pricing_core::calculations::CommercialSummary;
use pricing_core::payment::RoundedInstallment;
use pricing_core::Quote;

/// JSON document printed by `quote --json`
#[derive(Serialize)]
pub struct QuoteReport<'a> {
    pub quote: &'a Quote,
    pub deliverable: bool,
    pub commercial: Option<&'a CommercialSummary>,
    pub payment_schedule: Vec<RoundedInstallment>,
}

impl<'a> QuoteReport<'a> {
    pub fn new(quote: &'a Quote, commercial: Option<&'a CommercialSummary>) -> Self {
        let payment_schedule = if quote.is_deliverable() {
            quote.request.payment.rounded_schedule(quote.aggregate.total_final_price)
        } else {
            Vec::new()
        };
        QuoteReport {
            quote,
            deliverable: quote.is_deliverable(),
            commercial,
            payment_schedule,
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn banner(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "═══════════════════════════════════════")
}

/// Human-readable quote report.
pub fn render_quote(quote: &Quote, commercial: Option<&CommercialSummary>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let request = &quote.request;

    banner(&mut out, &format!("QUOTE: {}", request.contact.school_name))?;
    writeln!(out, "Schedule: {}", request.schedule)?;
    writeln!(out, "Discount: {}%", request.discount_percent)?;
    writeln!(out, "Quote ID: {}", quote.id)?;
    writeln!(out, "Prepared: {}", quote.created.format("%d-%b-%Y %I:%M %p"))?;
    writeln!(out)?;

    for p in &quote.programs {
        let s = &p.staffing;
        writeln!(out, "{} ({} students, sections of {})", p.request.program, p.request.student_count, p.request.section_size)?;
        writeln!(out, "  Sections:           {}", s.sections)?;
        writeln!(out, "  Full-time teachers: {}", s.full_time_teachers)?;
        writeln!(out, "  Variable days:      {}", s.variable_teacher_days)?;
        writeln!(out, "  Absence days:       {}", s.absence_coverage_days)?;
        writeln!(out, "  Cost:               {}", p.cost.total)?;
        writeln!(out, "  Base price:         {}", p.price.base_price)?;
        writeln!(out, "  Final price:        {}", p.price.final_price)?;
        writeln!(out, "  Price per student:  {}", p.price.price_per_student)?;
        writeln!(out)?;
    }

    let agg = &quote.aggregate;
    banner(&mut out, "TOTALS")?;
    writeln!(out, "Students:     {}", agg.total_students)?;
    writeln!(out, "Total cost:   {}", agg.total_cost)?;
    writeln!(out, "Total price:  {}", agg.total_final_price)?;
    writeln!(
        out,
        "Gross margin: {:.2}% (gate {:.0}%) {}",
        agg.gross_margin_percent,
        agg.margin_gate_percent,
        status_icon(agg.deliverable)
    )?;
    writeln!(out)?;

    if !agg.deliverable {
        writeln!(
            out,
            "Quote is {:.2} points below the margin gate; reduce the discount before sending.",
            agg.margin_shortfall()
        )?;
        return Ok(out);
    }

    if let Some(summary) = commercial {
        banner(&mut out, "COMMERCIAL SPLIT (per student)")?;
        for line in &summary.programs {
            let item = &line.item;
            writeln!(
                out,
                "{:<20} book {:>8}  service {:>8}  tax {:>6}",
                item.program.display_name(),
                item.book_price,
                item.service_fee,
                item.tax
            )?;
        }
        writeln!(out)?;
        writeln!(out, "Total book price:  {}", summary.total_book)?;
        writeln!(out, "Total service fee: {}", summary.total_service_fee)?;
        writeln!(out, "Total tax:         {}", summary.total_tax)?;
        writeln!(out, "Invoice total:     {}", summary.invoice_total())?;
        writeln!(out)?;
    }

    banner(&mut out, &format!("PAYMENT: {}", request.payment.display_name()))?;
    for installment in request.payment.rounded_schedule(agg.total_final_price) {
        writeln!(out, "{:<10} {}", installment.month.name(), group_whole(installment.amount))?;
    }

    Ok(out)
}

fn group_whole(amount: i64) -> String {
    pricing_core::Money(amount as f64).to_string()
}
