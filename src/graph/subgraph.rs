//! Per-recipe subgraphs and the merged view with shared-node marking.

use std::collections::{HashMap, HashSet};

use super::normalize::{Interner, resolve_category};
use super::types::{Category, Dataset, Link, NodeId, Triple};

/// All triples sharing one subject (typically one recipe).
#[derive(Clone, Debug, PartialEq)]
pub struct Subgraph {
	pub name: String,
	pub data: Dataset,
}

type LinkKey = (NodeId, NodeId, String);

fn link_key(link: &Link) -> LinkKey {
	(link.source, link.target, link.relation.clone())
}

/// Groups triples by subject, one subgraph per subject in first-seen order.
///
/// Node ids are global across the subgraphs (one id per display name), so a
/// node reached from several subjects carries the same id everywhere and is
/// flagged `is_shared`. The same goes for identical links.
pub fn partition_by_subject(triples: &[Triple]) -> Vec<Subgraph> {
	let mut interner = Interner::default();
	let mut order: Vec<String> = Vec::new();
	let mut groups: HashMap<String, (Vec<NodeId>, Vec<Link>)> = HashMap::new();

	for (sequence_index, triple) in triples.iter().enumerate() {
		let source = interner.intern(&triple.subject, || Category::Menu);
		let target = interner.intern(&triple.object, || {
			resolve_category(&triple.object, triple.category.as_deref())
		});

		let (nodes, links) = groups.entry(triple.subject.clone()).or_insert_with(|| {
			order.push(triple.subject.clone());
			Default::default()
		});
		for id in [source, target] {
			if !nodes.contains(&id) {
				nodes.push(id);
			}
		}
		let link = Link::new(source, target, triple.relation.clone(), sequence_index);
		if !links.iter().any(|l| link_key(l) == link_key(&link)) {
			links.push(link);
		}
	}

	let mut node_count: HashMap<NodeId, usize> = HashMap::new();
	let mut link_count: HashMap<LinkKey, usize> = HashMap::new();
	for (nodes, links) in groups.values() {
		for id in nodes {
			*node_count.entry(*id).or_default() += 1;
		}
		for link in links {
			*link_count.entry(link_key(link)).or_default() += 1;
		}
	}

	order
		.into_iter()
		.filter_map(|name| {
			let (ids, links) = groups.remove(&name)?;
			let nodes = ids
				.iter()
				.map(|id| {
					let mut node = interner.node(*id).clone();
					node.is_shared = node_count.get(id).copied().unwrap_or(0) > 1;
					node
				})
				.collect();
			let links = links
				.into_iter()
				.map(|mut link| {
					link.is_shared = link_count.get(&link_key(&link)).copied().unwrap_or(0) > 1;
					link
				})
				.collect();
			Some(Subgraph {
				name,
				data: Dataset::new(nodes, links),
			})
		})
		.collect()
}

/// Merges the selected subgraphs into one dataset.
///
/// Out-of-range indices are skipped; nodes are deduplicated by id and links
/// by (source, target, relation).
pub fn combine(subgraphs: &[Subgraph], selected: &[usize]) -> Dataset {
	let mut combined = Dataset::default();
	let mut seen_nodes: HashSet<NodeId> = HashSet::new();
	let mut seen_links: HashSet<LinkKey> = HashSet::new();

	for subgraph in selected.iter().filter_map(|&i| subgraphs.get(i)) {
		for node in &subgraph.data.nodes {
			if seen_nodes.insert(node.id) {
				combined.nodes.push(node.clone());
			}
		}
		for link in &subgraph.data.links {
			if seen_links.insert(link_key(link)) {
				combined.links.push(link.clone());
			}
		}
	}
	combined
}

/// Flags the nodes and links of `dataset` that more than one subject reaches.
///
/// `dataset` must come from [`normalize`](super::normalize::normalize) over the
/// same `triples`, so ids line up with the ones handed out here.
pub fn mark_shared(dataset: &mut Dataset, triples: &[Triple]) {
	let subgraphs = partition_by_subject(triples);
	let every: Vec<usize> = (0..subgraphs.len()).collect();
	let merged = combine(&subgraphs, &every);

	let nodes: HashSet<NodeId> = merged.nodes.iter().filter(|n| n.is_shared).map(|n| n.id).collect();
	let links: HashSet<LinkKey> = merged.links.iter().filter(|l| l.is_shared).map(link_key).collect();
	for node in &mut dataset.nodes {
		node.is_shared = nodes.contains(&node.id);
	}
	for link in &mut dataset.links {
		link.is_shared = links.contains(&link_key(link));
	}
}
