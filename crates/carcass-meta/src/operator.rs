//! Server operators

/// A player granted operator permissions on every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub uuid: String,
    pub name: String,
}

/// Pair operator names and UUIDs by position.
///
/// Only indices present in both lists produce an entry, so the result has
/// `min(names.len(), uuids.len())` operators. Unpaired extras are dropped.
pub fn pair_operators(names: &[String], uuids: &[String]) -> Vec<Operator> {
    if names.len() != uuids.len() {
        tracing::debug!(
            names = names.len(),
            uuids = uuids.len(),
            "Operator lists differ in length; unpaired entries dropped"
        );
    }

    names
        .iter()
        .zip(uuids)
        .map(|(name, uuid)| Operator {
            uuid: uuid.clone(),
            name: name.clone(),
        })
        .collect()
}
