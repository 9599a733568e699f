use crate::csv_table::Record;

pub const ID_COLUMN: &str = "shipment_contract_number";
pub const LEGACY_URL_COLUMN: &str = "truesight_dao_shipment_url";
pub const CACAO_COLUMN: &str = "is_cacao_shipment";
pub const SERIALIZED_COLUMN: &str = "serialized";

/// The columns of a shipment manifest row that redirect identification reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    /// Contract number, lower-cased.
    pub id: String,
    pub legacy_url: String,
    pub is_cacao: bool,
    pub is_serialized: bool,
}

impl Shipment {
    /// Returns `None` for rows without a contract number.
    pub fn from_record(record: &Record) -> Option<Self> {
        let id = record.get_or_empty(ID_COLUMN).to_lowercase();
        if id.is_empty() {
            return None;
        }
        Some(Self {
            id,
            legacy_url: record.get_or_empty(LEGACY_URL_COLUMN).to_string(),
            is_cacao: parse_flag(record.get_or_empty(CACAO_COLUMN)),
            is_serialized: parse_flag(record.get_or_empty(SERIALIZED_COLUMN)),
        })
    }
}

/// Only a case-insensitive `true` counts as set.
pub fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_table::parse;

    #[test]
    fn rows_without_an_id_are_skipped() {
        let records = parse(
            "shipment_contract_number,is_cacao_shipment,serialized\n\
             AGL13,TRUE,false\n\
             ,true,true\n",
        );
        let shipments = records
            .iter()
            .filter_map(Shipment::from_record)
            .collect::<Vec<_>>();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].id, "agl13");
        assert!(shipments[0].is_cacao);
        assert!(!shipments[0].is_serialized);
        assert_eq!(shipments[0].legacy_url, "");
    }

    #[test]
    fn flags_accept_only_true() {
        assert!(parse_flag("True"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("1"));
        assert!(!parse_flag(""));
    }
}
