//! Terminal rendering of submission overviews and rule tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qbank_model::{ContentKind, QualitySummary, Severity, SubmissionMetadata};
use qbank_validate::{
    EXERCISE_RULES, GateDecision, QA_RULES, QualityRule, error_categories, suggestions_for,
};

/// Label/value pairs shown in the overview table.
pub fn overview_rows(metadata: &SubmissionMetadata) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("文件名", metadata.filename.clone()),
        ("类型", metadata.kind.to_string()),
        ("系统识别", metadata.detected_kind.to_string()),
        ("有效条目", metadata.total.to_string()),
        ("Sheet", metadata.sheets.join(", ")),
        ("列名", metadata.columns.join(", ")),
    ];
    if metadata.kind == ContentKind::Exercise {
        if let Some(exercise_type) = metadata.exercise_type {
            rows.push(("题型", exercise_type.to_string()));
        }
        if let Some(level) = metadata.level {
            rows.push(("级别", level.to_string()));
        }
    }
    if let Some(summary) = &metadata.quality_summary {
        rows.push((
            "质量",
            format!(
                "均分 {}，Error {}，Warn {}",
                summary.score_avg, summary.error_count, summary.warn_count
            ),
        ));
    }
    if let Some(digest) = &metadata.digest {
        rows.push(("SHA-256", digest.chars().take(16).collect()));
    }
    rows
}

/// Percentage of `count` over `total` rows, rounded to 2 decimals.
pub fn percent(count: usize, total: usize) -> f64 {
    let ratio = count as f64 / total.max(1) as f64;
    (ratio * 10_000.0).round() / 100.0
}

pub fn print_overview(metadata: &SubmissionMetadata, warnings: &[String]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    for (label, value) in overview_rows(metadata) {
        table.add_row(vec![label_cell(label), Cell::new(value)]);
    }
    println!("{table}");

    if let Some(summary) = &metadata.quality_summary {
        print_quality(summary, metadata.total, metadata.kind);
    }

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in warnings {
            println!("- {warning}");
        }
    }
}

fn print_quality(summary: &QualitySummary, total: usize, kind: ContentKind) {
    let mut categories = Table::new();
    categories.set_header(vec![
        header_cell("类别"),
        header_cell("数量"),
        header_cell("占比(%)"),
    ]);
    apply_table_style(&mut categories);
    align_column(&mut categories, 1, CellAlignment::Right);
    align_column(&mut categories, 2, CellAlignment::Right);
    for (category, count) in error_categories(summary) {
        categories.add_row(vec![
            Cell::new(category.label()),
            count_cell(count, Color::Red),
            Cell::new(percent(count, total)),
        ]);
    }
    println!();
    println!("问题分类概览（Error）");
    println!("{categories}");

    if !summary.errors.is_empty() || !summary.warns.is_empty() {
        let mut codes = Table::new();
        codes.set_header(vec![
            header_cell("Severity"),
            header_cell("Code"),
            header_cell("Count"),
        ]);
        apply_table_style(&mut codes);
        align_column(&mut codes, 0, CellAlignment::Center);
        align_column(&mut codes, 2, CellAlignment::Right);
        for (severity, map) in [
            (Severity::Error, &summary.errors),
            (Severity::Warn, &summary.warns),
        ] {
            for (code, count) in map {
                codes.add_row(vec![
                    severity_cell(severity),
                    Cell::new(code),
                    Cell::new(count),
                ]);
            }
        }
        println!("{codes}");
    }

    if summary.has_errors() {
        println!();
        println!("修复建议:");
        for tip in suggestions_for(&summary.errors, kind) {
            println!("- {tip}");
        }
    }
}

pub fn print_gate(decision: &GateDecision, metadata: &SubmissionMetadata, threshold: f64) {
    let ratio = metadata
        .quality_summary
        .as_ref()
        .map_or(0.0, |summary| summary.error_row_ratio);
    println!(
        "质量错误占比：{}%（阈值 {}%）",
        (ratio * 10_000.0).round() / 100.0,
        (threshold * 100.0).round()
    );
    if decision.accepted {
        println!("Gate: accepted");
    } else {
        eprintln!("Gate: rejected");
        for reason in &decision.reasons {
            eprintln!("- {reason}");
        }
    }
}

pub fn print_rules(kind: Option<ContentKind>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Code"),
        header_cell("Severity"),
        header_cell("Deduction"),
        header_cell("Applies to"),
        header_cell("Message"),
        header_cell("Opt-in"),
    ]);
    apply_rules_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    if kind.is_none_or(|kind| kind == ContentKind::Qa) {
        add_rule_rows(&mut table, ContentKind::Qa, QA_RULES);
    }
    if kind.is_none_or(|kind| kind == ContentKind::Exercise) {
        add_rule_rows(&mut table, ContentKind::Exercise, EXERCISE_RULES);
    }
    println!("{table}");
}

fn add_rule_rows<R>(table: &mut Table, kind: ContentKind, rules: &[QualityRule<R>]) {
    for rule in rules {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(rule.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            severity_cell(rule.severity),
            Cell::new(rule.deduction),
            Cell::new(rule.applies_to),
            Cell::new(rule.message),
            if rule.garbled {
                Cell::new("--garbled-check").fg(Color::DarkGrey)
            } else {
                dim_cell("-")
            },
        ]);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_rules_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warn => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::DarkGrey),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
