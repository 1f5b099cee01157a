use super::schema::parse_schema;
use crate::schema::Schema;
use term_table::row::Row;
use term_table::table_cell::{Alignment, TableCell};
use term_table::Table;

fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

fn italic(s: &str) -> String {
    format!("\x1b[3m{s}\x1b[0m")
}

fn optional(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => italic("-"),
    }
}

pub fn format_schema(title: &str, schema: &Schema) -> String {
    let mut table = Table::new();

    table.add_row(Row::new(vec![TableCell::new_with_alignment(
        bold(title),
        5,
        Alignment::Center,
    )]));
    table.add_row(Row::new(vec![
        TableCell::new(bold("Column")),
        TableCell::new(bold("Type")),
        TableCell::new(bold("Length")),
        TableCell::new(bold("Precision")),
        TableCell::new(bold("Nullable")),
    ]));

    for column in schema.columns() {
        let data_type = column.data_type();
        table.add_row(Row::new(vec![
            TableCell::new(column.name()),
            TableCell::new(data_type.keyword()),
            TableCell::new_with_alignment(optional(data_type.length()), 1, Alignment::Right),
            TableCell::new_with_alignment(optional(data_type.precision()), 1, Alignment::Right),
            TableCell::new_with_alignment(
                if column.is_nullable() { "yes" } else { "no" },
                1,
                Alignment::Center,
            ),
        ]));
    }

    table.render()
}

pub fn inspect(title: &str, input: &[u8]) -> Result<String, String> {
    let schema = parse_schema(input).map_err(|e| format!("Error Parsing Schema: {e}"))?;
    Ok(format_schema(title, &schema))
}
