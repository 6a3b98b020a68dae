use std::collections::HashSet;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use tx_generator::generator::{GenerationSummary, Generator, GeneratorConfig};
use tx_generator::source::RngSource;

fn generate_seeded(seed: u64, config: GeneratorConfig) -> (GenerationSummary, String) {
    let source = RngSource::new(StdRng::seed_from_u64(seed));
    let mut generator = Generator::new(config, source).unwrap();
    let mut out = Vec::new();
    let summary = generator.write_csv(&mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

fn read_rows(output: &str) -> (StringRecord, Vec<StringRecord>) {
    let mut reader = ReaderBuilder::new().from_reader(output.as_bytes());
    let header = reader.headers().unwrap().clone();
    let rows = reader.records().map(Result::unwrap).collect();
    (header, rows)
}

fn is_four_place_amount(field: &str) -> bool {
    match field.split_once('.') {
        Some((whole, fraction)) => {
            !whole.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && fraction.len() == 4
                && fraction.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

#[test]
fn test_header_is_first_line() {
    let (_, output) = generate_seeded(1, GeneratorConfig::default());
    assert_eq!(output.lines().next(), Some("type,client,tx,amount"));

    let (header, _) = read_rows(&output);
    assert_eq!(
        header.iter().collect::<Vec<_>>(),
        vec!["type", "client", "tx", "amount"]
    );
}

#[test]
fn test_default_run_row_properties() {
    let (summary, output) = generate_seeded(2, GeneratorConfig::default());
    let (_, rows) = read_rows(&output);

    assert_eq!(rows.len(), summary.rows());
    assert!(rows.len() <= 10_000);
    assert_eq!(summary.rows() + summary.skipped, 10_000);

    let mut deposits = HashSet::new();
    let mut funded_ids = HashSet::new();
    for row in &rows {
        assert_eq!(row.len(), 4);
        let client: u16 = row[1].parse().unwrap();
        assert!(client < 25);
        let tx: u32 = row[2].parse().unwrap();
        assert!(tx < 10_000);

        match &row[0] {
            "deposit" | "withdrawal" => {
                assert!(is_four_place_amount(&row[3]), "bad amount {:?}", &row[3]);
                assert!(Decimal::from_str(&row[3]).unwrap() > Decimal::ZERO);
                assert!(funded_ids.insert(tx), "tx {} emitted twice", tx);
                if &row[0] == "deposit" {
                    deposits.insert(tx);
                }
            }
            "dispute" | "resolve" | "chargeback" => {
                assert_eq!(&row[3], "");
                assert!(deposits.contains(&tx), "tx {} refers to no earlier deposit", tx);
            }
            other => panic!("unexpected category {}", other),
        }
    }
}

#[test]
fn test_dispute_rows_end_with_trailing_comma() {
    let (_, output) = generate_seeded(3, GeneratorConfig::new(500, 5));
    for line in output.lines().skip(1) {
        let is_dispute_like = ["dispute,", "resolve,", "chargeback,"]
            .iter()
            .any(|prefix| line.starts_with(prefix));
        assert_eq!(line.ends_with(','), is_dispute_like, "line {:?}", line);
    }
}

#[test]
fn test_every_category_appears() {
    let (summary, output) = generate_seeded(4, GeneratorConfig::default());
    let (_, rows) = read_rows(&output);
    let categories: HashSet<String> = rows.iter().map(|row| row[0].to_string()).collect();

    assert_eq!(categories.len(), 5);
    assert!(summary.deposits > 0);
    assert!(summary.chargebacks > 0);
}

#[test]
fn test_small_client_count_is_respected() {
    let (_, output) = generate_seeded(5, GeneratorConfig::new(1_000, 2));
    let (_, rows) = read_rows(&output);
    let clients: HashSet<u16> = rows.iter().map(|row| row[1].parse().unwrap()).collect();
    assert_eq!(clients, HashSet::from([0, 1]));
}

#[test]
fn test_same_seed_same_output() {
    let (_, first) = generate_seeded(42, GeneratorConfig::default());
    let (_, second) = generate_seeded(42, GeneratorConfig::default());
    assert_eq!(first, second);

    let (_, other) = generate_seeded(43, GeneratorConfig::default());
    assert_ne!(first, other);
}

#[test]
fn test_generate_agrees_with_write_csv() {
    let config = GeneratorConfig::new(200, 3);
    let (summary, output) = generate_seeded(6, config);

    let source = RngSource::new(StdRng::seed_from_u64(6));
    let records = Generator::new(config, source).unwrap().generate().unwrap();
    assert_eq!(records.len(), summary.rows());

    let (_, rows) = read_rows(&output);
    for (record, row) in records.iter().zip(rows.iter()) {
        assert_eq!(record.transaction_type.as_str(), &row[0]);
        assert_eq!(record.client_id.to_string(), &row[1]);
        assert_eq!(record.transaction_id.to_string(), &row[2]);
        assert_eq!(
            record.amount.map(|amount| amount.to_string()).unwrap_or_default(),
            &row[3]
        );
    }
}
