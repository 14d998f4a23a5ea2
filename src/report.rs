//! Summary and detail tables, as plain text and as a Typst document.

use crate::extract::{DetailRow, SummaryCounts};

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<String>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn text_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = format_line(header, &widths);
    out.push('\n');
    out.push_str(&format_line(&rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    out.push('\n');
    for row in rows {
        out.push_str(&format_line(&row.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
        out.push('\n');
    }
    out
}

fn summary_rows(summary: &SummaryCounts) -> Vec<Vec<String>> {
    summary
        .iter()
        .map(|(kind, count)| vec![kind.to_string(), count.to_string()])
        .collect()
}

fn detail_rows(details: &[DetailRow]) -> Vec<Vec<String>> {
    details
        .iter()
        .map(|d| vec![d.name.clone(), d.kind.to_string(), d.length_label.clone()])
        .collect()
}

pub fn summary_table(summary: &SummaryCounts) -> String {
    text_table(&["Element Type", "Count"], &summary_rows(summary))
}

pub fn details_table(details: &[DetailRow]) -> String {
    text_table(&["Name", "Type", "Length"], &detail_rows(details))
}

pub struct Data {
    pub name: String,
    pub summary: SummaryCounts,
    pub details: Vec<DetailRow>,
    pub svg: String,
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '/' | '[' | ']' | '#' | '*' | '_' | '$' | '@' | '<' | '>' | '`' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn typst_table(doc: &mut String, header: &[&str], rows: &[Vec<String>]) {
    let columns = vec!["1fr"; header.len()].join(", ");
    doc.push_str("#table(\n");
    doc.push_str(&format!("  columns: ({},),\n", columns));
    doc.push_str("  inset: 10pt,\n");
    doc.push_str("  align: horizon,\n");
    let cells = header
        .iter()
        .map(|h| format!("[*{}*]", h))
        .collect::<Vec<String>>()
        .join(", ");
    doc.push_str(&format!("  {},\n", cells));
    for row in rows {
        let cells = row
            .iter()
            .map(|c| format!("[{}]", escape(c)))
            .collect::<Vec<String>>()
            .join(", ");
        doc.push_str(&format!("  {},\n", cells));
    }
    doc.push_str(")\n\n");
}

pub fn make_typst_document(data: &[Data]) -> String {
    let mut doc = String::from("#set page(paper: \"a4\")\n#set text(size: 11pt)\n\n");

    for item in data {
        doc.push_str(&format!("== * {} *\n\n", escape(&item.name)));

        doc.push_str("=== Summary\n\n");
        typst_table(&mut doc, &["Element Type", "Count"], &summary_rows(&item.summary));

        doc.push_str("=== Details\n\n");
        typst_table(&mut doc, &["Name", "Type", "Length"], &detail_rows(&item.details));

        // raw block keeps the svg markup away from the typst parser
        doc.push_str("#align(center, image(\n");
        doc.push_str(&format!("  bytes(```{}```.text),\n", item.svg));
        doc.push_str("  width: 80%\n");
        doc.push_str("))\n\n");

        doc.push_str("#pagebreak()\n\n");
    }

    doc
}
