use crate::error::LoadError;
use crate::models::Dataset;
use crate::normalize::clean_cell;

/// Parses tab-separated text (the shape Excel produces on copy) into a
/// dataset. The first line is the column headers; rows shorter than the
/// header are padded with blanks.
pub fn parse_tsv(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::EmptyInput);
    }

    let mut dataset = Dataset::new(headers);
    for record in reader.records() {
        let record = record?;
        let values = record.iter().map(|v| clean_cell(v.to_string())).collect();
        dataset.push_row(values);
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_and_blanks() {
        let ds = parse_tsv("Item Name\tUnits\nAGE\tyears\nWEIGHT\t\n").unwrap();
        assert_eq!(ds.columns, vec!["Item Name", "Units"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0]["Units"], Some("years".to_string()));
        assert_eq!(ds.rows[1]["Units"], None);
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = parse_tsv("A\tB\tC\nx\n").unwrap();
        assert_eq!(ds.rows[0]["B"], None);
        assert_eq!(ds.rows[0]["C"], None);
    }

    #[test]
    fn empty_input_is_reported() {
        assert!(matches!(parse_tsv(""), Err(LoadError::EmptyInput)));
    }
}
