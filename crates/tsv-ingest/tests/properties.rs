//! Property tests for coercion and mapping invariants.

use proptest::prelude::*;

use tsv_ingest::{
    ColumnMapping, ColumnTarget, DecodeOutcome, Decoder, DecoderConfig, coerce, split_list,
};
use tsv_model::{FieldType, NormalizationForm, Value, tsv_record};

tsv_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Person {
        #[tsv = "name"]
        name: String,
        #[tsv = "age"]
        age: i64,
        #[tsv = "active"]
        active: bool,
    }
}

const SENTINEL: &str = "\\N";

proptest! {
    #[test]
    fn text_coercion_is_trimmed_identity(raw in "\\PC{0,24}") {
        let config = DecoderConfig::new(",", SENTINEL);
        let value = coerce(&raw, &FieldType::Text, &config).unwrap();
        let trimmed = raw.trim();
        let expected = if trimmed == SENTINEL { "" } else { trimmed };
        prop_assert_eq!(value, Value::Text(expected.to_string()));
    }

    #[test]
    fn normalized_text_matches_normalization_form(raw in "\\PC{1,24}") {
        let config = DecoderConfig::new(",", SENTINEL).with_normalization(NormalizationForm::Nfc);
        let value = coerce(&raw, &FieldType::Text, &config).unwrap();
        let trimmed = raw.trim();
        let expected = if trimmed == SENTINEL {
            String::new()
        } else {
            NormalizationForm::Nfc.apply(trimmed).into_owned()
        };
        prop_assert_eq!(value, Value::Text(expected));
    }

    #[test]
    fn list_split_is_idempotent(raw in "[a-z ,]{0,32}") {
        let first = split_list(&raw, Some(","), NormalizationForm::None);
        let rejoined = first.join(",");
        let second = split_list(&rejoined, Some(","), NormalizationForm::None);
        prop_assert!(first.iter().all(|item| !item.is_empty() && item.trim() == item));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn positional_mapping_pairs_column_with_field(columns in 0usize..12, fields in 0usize..12) {
        let mapping = ColumnMapping::positional(columns, fields);
        prop_assert_eq!(mapping.len(), columns);
        for i in 0..columns + 2 {
            let expected = if i < columns.min(fields) {
                ColumnTarget::Mapped(i)
            } else {
                ColumnTarget::Skipped
            };
            prop_assert_eq!(mapping.target(i), expected);
        }
    }

    #[test]
    fn header_order_does_not_change_records(
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
        name in "[a-z]{1,8}",
        age in any::<i64>(),
        active in any::<bool>(),
    ) {
        let names = ["name", "age", "active"];
        let cells = [name.clone(), age.to_string(), active.to_string()];
        let header: Vec<&str> = order.iter().map(|&i| names[i]).collect();
        let row: Vec<&str> = order.iter().map(|&i| cells[i].as_str()).collect();
        let input = format!("{}\n{}\n", header.join("\t"), row.join("\t"));

        let mut decoder = Decoder::for_record::<Person>(input.as_bytes(), DecoderConfig::default())
            .unwrap();
        let mut person = Person::default();
        prop_assert_eq!(decoder.advance(&mut person).unwrap(), DecodeOutcome::Decoded);
        prop_assert_eq!(person, Person { name, age, active });
    }

    #[test]
    fn blank_lines_are_transparent(blanks in proptest::collection::vec(0usize..4, 1..6)) {
        let mut input = String::new();
        for (i, count) in blanks.iter().enumerate() {
            input.push_str(&"\n".repeat(*count));
            input.push_str(&format!("row{i}\t{i}\ttrue\n"));
        }

        let mut decoder =
            Decoder::for_record_without_header::<Person>(input.as_bytes(), DecoderConfig::default());
        let mut person = Person::default();
        let mut decoded = 0usize;
        while decoder.advance(&mut person).unwrap() == DecodeOutcome::Decoded {
            prop_assert_eq!(&person.name, &format!("row{decoded}"));
            decoded += 1;
        }
        prop_assert_eq!(decoded, blanks.len());
    }
}
