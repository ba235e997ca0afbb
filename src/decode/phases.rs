//! Phases feed: `[id, name, colorTag]`.

use super::cell;
use crate::feed::read_records;
use crate::models::Phase;
use tracing::debug;

/// Decode one phases record. Rows without an id are dropped.
pub fn decode_phase(fields: &[String]) -> Option<Phase> {
    let id = cell(fields, 0);
    if id.is_empty() {
        return None;
    }

    Some(Phase {
        id: id.to_string(),
        name: cell(fields, 1).to_string(),
        color_tag: cell(fields, 2).to_string(),
    })
}

/// Decode the full phases payload, keeping feed order.
pub fn decode_phases(text: &str) -> Vec<Phase> {
    let records = read_records(text);
    let total = records.len();

    let phases: Vec<Phase> = records.iter().filter_map(|r| decode_phase(r)).collect();

    debug!(
        "Decoded {} phases ({} rows dropped)",
        phases.len(),
        total - phases.len()
    );
    phases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_decode_phase() {
        let phase = decode_phase(&row(&["P1", "Fase 1: Descubrimiento", "orange"])).unwrap();
        assert_eq!(phase.id, "P1");
        assert_eq!(phase.name, "Fase 1: Descubrimiento");
        assert_eq!(phase.color_tag, "orange");
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let phase = decode_phase(&row(&["P2"])).unwrap();
        assert_eq!(phase.name, "");
        assert_eq!(phase.color_tag, "");
    }

    #[test]
    fn test_empty_id_is_dropped() {
        assert!(decode_phase(&row(&["", "Orphan", "grey"])).is_none());
    }

    #[test]
    fn test_decode_phases_payload() {
        let text = "ID,Nombre,Color\nP1,Discovery,orange\n,No id,grey\n\nP2,\"Build, ship\",blue\n";
        let phases = decode_phases(text);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].id, "P1");
        assert_eq!(phases[1].name, "Build, ship");
    }
}
