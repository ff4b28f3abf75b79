use crate::records::Direction;

pub trait LabelOracle: Send + Sync {
    fn label(&self, entity_id: &str) -> bool;
}

impl<F> LabelOracle for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn label(&self, entity_id: &str) -> bool {
        self(entity_id)
    }
}

#[derive(Debug, Clone)]
pub struct SubstringOracle {
    needles: Vec<String>,
}

impl SubstringOracle {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let needles = names
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { needles }
    }
}

impl LabelOracle for SubstringOracle {
    fn label(&self, entity_id: &str) -> bool {
        let id = entity_id.to_lowercase();
        self.needles.iter().any(|n| id.contains(n.as_str()))
    }
}

pub fn label_entity(
    oracle: &dyn LabelOracle,
    entity_id: &str,
    direction: Option<Direction>,
    required: Option<Direction>,
) -> bool {
    let direction_ok = match required {
        Some(req) => direction == Some(req),
        None => true,
    };
    direction_ok && oracle.label(&entity_id.to_lowercase())
}
