//! Raw triples to a renderable [`Dataset`].

use std::collections::HashMap;

use super::error::{GraphError, Result};
use super::types::{Category, Dataset, KnowledgeGraphPayload, Link, Node, NodeId, Triple};

pub const HEALTH_BENEFIT_MARKER: &str = "功效";

/// Category for an object string: explicit category first, then the name markers.
pub fn resolve_category(object: &str, explicit: Option<&str>) -> Category {
	if let Some(raw) = explicit.map(str::trim).filter(|raw| !raw.is_empty()) {
		return Category::parse(raw);
	}
	if object.contains(HEALTH_BENEFIT_MARKER) {
		Category::HealthBenefit
	} else {
		// recipe names ("食谱") and anything unmarked
		Category::Menu
	}
}

/// Hands out one id per distinct display name, in first-seen order.
#[derive(Default)]
pub(crate) struct Interner {
	ids: HashMap<String, NodeId>,
	nodes: Vec<Node>,
}

impl Interner {
	pub(crate) fn intern(&mut self, name: &str, category: impl FnOnce() -> Category) -> NodeId {
		if let Some(&id) = self.ids.get(name) {
			return id;
		}
		let id = self.nodes.len() as NodeId;
		self.nodes.push(Node::new(id, name, category()));
		self.ids.insert(name.to_string(), id);
		id
	}

	pub(crate) fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id as usize]
	}

	pub(crate) fn into_nodes(self) -> Vec<Node> {
		self.nodes
	}
}

/// Single pass over `triples`; one link per triple, parallel edges kept.
pub fn normalize(triples: &[Triple]) -> Dataset {
	let mut interner = Interner::default();
	let mut links = Vec::with_capacity(triples.len());

	for (sequence_index, triple) in triples.iter().enumerate() {
		let source = interner.intern(&triple.subject, || Category::Menu);
		let target = interner.intern(&triple.object, || {
			resolve_category(&triple.object, triple.category.as_deref())
		});
		links.push(Link::new(source, target, triple.relation.clone(), sequence_index));
	}

	Dataset::new(interner.into_nodes(), links)
}

/// Zips the column arrays into triples, refusing mismatched lengths.
pub fn triples_from_columns(payload: &KnowledgeGraphPayload) -> Result<Vec<Triple>> {
	let (subjects, relations, objects) =
		(payload.subject.len(), payload.relation.len(), payload.object.len());
	if subjects != relations || relations != objects {
		return Err(GraphError::MalformedTriple {
			subjects,
			relations,
			objects,
		});
	}
	if let Some(cat) = &payload.cat {
		if cat.len() > subjects {
			return Err(GraphError::MalformedCategories {
				categories: cat.len(),
				triples: subjects,
			});
		}
	}

	Ok((0..subjects)
		.map(|i| Triple {
			subject: payload.subject[i].clone(),
			relation: payload.relation[i].clone(),
			object: payload.object[i].clone(),
			category: payload.cat.as_ref().and_then(|cat| cat.get(i).cloned()),
		})
		.collect())
}

pub fn normalize_columns(payload: &KnowledgeGraphPayload) -> Result<Dataset> {
	let triples = triples_from_columns(payload)?;
	Ok(normalize(&triples))
}
