use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (by extension) and deserialise into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    parse_contents(&canonical, &contents)
}

fn parse_contents<T: DeserializeOwned>(
    path: &Path,
    contents: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let value: T = if is_yaml {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?
    };
    Ok(value)
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    // Basic existence check
    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deal_analyzer_core::{DealInput, LoanType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_yaml_partial_deal() {
        let yaml = "purchase_price: 250000\nloan_type: amount\ndown_payment_amount: 50000\n";
        let input: DealInput = parse_contents(Path::new("deal.yaml"), yaml).unwrap();
        assert_eq!(input.purchase_price, dec!(250000));
        assert_eq!(input.loan_type, LoanType::Amount);
        assert_eq!(input.gross_monthly_rent, dec!(3000));
    }

    #[test]
    fn test_json_deal() {
        let json = r#"{"gross_monthly_rent": "2200", "loan_term": 15}"#;
        let input: DealInput = parse_contents(Path::new("deal.json"), json).unwrap();
        assert_eq!(input.gross_monthly_rent, dec!(2200));
        assert_eq!(input.loan_term, dec!(15));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_contents::<DealInput>(Path::new("broken.json"), "{").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input::<DealInput>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}
