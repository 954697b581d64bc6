//! Pure derivations of sub-datasets from a full [`Dataset`].

use std::collections::HashSet;

use super::types::{Category, Dataset, Link, Node, NodeId};

fn subset(dataset: &Dataset, keep: &HashSet<NodeId>) -> Dataset {
	let nodes: Vec<Node> = dataset
		.nodes
		.iter()
		.filter(|node| keep.contains(&node.id))
		.cloned()
		.collect();
	let links: Vec<Link> = dataset
		.links
		.iter()
		.filter(|link| keep.contains(&link.source) && keep.contains(&link.target))
		.cloned()
		.collect();
	Dataset::new(nodes, links)
}

/// Nodes named in `node_ids`, and the links whose two ends were both named.
pub fn filter_to_mentioned(node_ids: &[NodeId], dataset: &Dataset) -> Dataset {
	let keep: HashSet<NodeId> = node_ids.iter().copied().collect();
	subset(dataset, &keep)
}

/// The connected component around `seed`, following links in both directions.
///
/// A seed that is not part of `dataset` yields a placeholder singleton with
/// no links rather than an error.
pub fn expand_from_seed(seed: NodeId, dataset: &Dataset) -> Dataset {
	let Some(seed_node) = dataset.node(seed) else {
		return Dataset::new(vec![placeholder(seed)], Vec::new());
	};
	if dataset.links.is_empty() {
		return Dataset::new(vec![seed_node.clone()], Vec::new());
	}

	let mut included = HashSet::from([seed]);
	// each productive pass adds at least one node
	for _ in 0..dataset.nodes.len() {
		let before = included.len();
		for link in &dataset.links {
			if included.contains(&link.source) || included.contains(&link.target) {
				included.insert(link.source);
				included.insert(link.target);
			}
		}
		if included.len() == before {
			break;
		}
	}
	subset(dataset, &included)
}

/// One hop around `seed`: the seed, its neighbours and the links touching it.
pub fn select_neighborhood(seed: NodeId, dataset: &Dataset) -> Dataset {
	if !dataset.contains(seed) {
		return Dataset::default();
	}
	let mut keep = dataset.neighbors(seed);
	keep.insert(seed);
	let nodes = dataset
		.nodes
		.iter()
		.filter(|node| keep.contains(&node.id))
		.cloned()
		.collect();
	let links = dataset
		.links
		.iter()
		.filter(|link| link.touches(seed))
		.cloned()
		.collect();
	Dataset::new(nodes, links)
}

/// The seed plus the first `step` of `steps` shares of its neighbours.
///
/// Neighbours keep dataset order and the share rounds down, so step 0 shows
/// the seed alone and step `steps` the whole one-hop neighbourhood.
pub fn reveal_neighborhood(seed: NodeId, dataset: &Dataset, step: usize, steps: usize) -> Dataset {
	let neighborhood = select_neighborhood(seed, dataset);
	let others: Vec<NodeId> = neighborhood
		.nodes
		.iter()
		.map(|node| node.id)
		.filter(|&id| id != seed)
		.collect();
	let shown = if steps == 0 {
		others.len()
	} else {
		others.len() * step.min(steps) / steps
	};
	let mut keep: HashSet<NodeId> = others.into_iter().take(shown).collect();
	keep.insert(seed);
	subset(&neighborhood, &keep)
}

fn placeholder(id: NodeId) -> Node {
	Node::new(id, id.to_string(), Category::Menu)
}

/// Result of matching chat keywords against node names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mentions {
	/// Nodes whose name matched a keyword directly.
	pub keyword_ids: Vec<NodeId>,
	/// Keyword hits plus their direct neighbours, deduplicated, in dataset order.
	pub mentioned_ids: Vec<NodeId>,
}

pub fn mentioned_from_keywords(keywords: &[String], dataset: &Dataset) -> Mentions {
	let keywords: Vec<&str> = keywords
		.iter()
		.map(|k| k.trim())
		.filter(|k| !k.is_empty())
		.collect();

	let keyword_ids: Vec<NodeId> = dataset
		.nodes
		.iter()
		.filter(|node| {
			keywords
				.iter()
				.any(|k| k.contains(node.display_name.as_str()) || node.display_name.contains(k))
		})
		.map(|node| node.id)
		.collect();

	let mut reached: HashSet<NodeId> = keyword_ids.iter().copied().collect();
	for &id in &keyword_ids {
		reached.extend(dataset.neighbors(id));
	}
	let mentioned_ids = dataset
		.nodes
		.iter()
		.map(|node| node.id)
		.filter(|id| reached.contains(id))
		.collect();

	Mentions {
		keyword_ids,
		mentioned_ids,
	}
}

pub fn degree_of(id: NodeId, dataset: &Dataset) -> usize {
	dataset
		.links
		.iter()
		.map(|link| (link.source == id) as usize + (link.target == id) as usize)
		.sum()
}

/// Ids of the `n` best-connected nodes; ties go to the node seen first.
pub fn top_by_degree(n: usize, dataset: &Dataset) -> HashSet<NodeId> {
	let mut ranked: Vec<(usize, usize, NodeId)> = dataset
		.nodes
		.iter()
		.enumerate()
		.map(|(order, node)| (degree_of(node.id, dataset), order, node.id))
		.collect();
	ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
	ranked.into_iter().take(n).map(|(_, _, id)| id).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::normalize::normalize;
	use crate::graph::types::Triple;

	fn sample() -> Dataset {
		// 0:Salad 1:Tomato 2:Lettuce 3:Soup 4:Tofu 5:Bowl 6:Rice
		normalize(&[
			Triple::new("Salad", "含有", "Tomato"),
			Triple::new("Salad", "含有", "Lettuce"),
			Triple::new("Soup", "含有", "Tofu"),
			Triple::new("Soup", "含有", "Tomato"),
			Triple::new("Bowl", "含有", "Rice"),
		])
	}

	fn ids(data: &Dataset) -> HashSet<NodeId> {
		data.node_ids()
	}

	fn link_keys(data: &Dataset) -> HashSet<usize> {
		data.links.iter().map(|l| l.sequence_index).collect()
	}

	#[test]
	fn filtering_to_every_id_is_identity() {
		let data = sample();
		let all: Vec<NodeId> = data.nodes.iter().map(|n| n.id).collect();
		let out = filter_to_mentioned(&all, &data);
		assert_eq!(ids(&out), ids(&data));
		assert_eq!(link_keys(&out), link_keys(&data));
	}

	#[test]
	fn filter_keeps_links_only_when_both_ends_selected() {
		let data = sample();
		let out = filter_to_mentioned(&[0, 1, 4], &data);
		assert_eq!(ids(&out), HashSet::from([0, 1, 4]));
		assert_eq!(out.links.len(), 1);
		assert_eq!((out.links[0].source, out.links[0].target), (0, 1));
	}

	#[test]
	fn empty_mention_yields_empty_dataset() {
		let out = filter_to_mentioned(&[], &sample());
		assert!(out.nodes.is_empty() && out.links.is_empty());
	}

	#[test]
	fn expand_reaches_whole_component() {
		let data = sample();
		let out = expand_from_seed(2, &data);
		assert_eq!(ids(&out), HashSet::from([0, 1, 2, 3, 4]));
		assert_eq!(out.links.len(), 4);
	}

	#[test]
	fn expand_is_a_fixed_point() {
		let data = sample();
		let once = expand_from_seed(4, &data);
		let twice = expand_from_seed(4, &once);
		assert_eq!(once, twice);
	}

	#[test]
	fn expand_isolated_seed_is_singleton() {
		let mut data = sample();
		data.nodes.push(Node::new(99, "Water", Category::Menu));
		let out = expand_from_seed(99, &data);
		assert_eq!(ids(&out), HashSet::from([99]));
		assert!(out.links.is_empty());
	}

	#[test]
	fn expand_unknown_seed_is_placeholder_singleton() {
		let out = expand_from_seed(1234, &sample());
		assert_eq!(out.nodes.len(), 1);
		assert_eq!(out.nodes[0].id, 1234);
		assert!(out.links.is_empty());
	}

	#[test]
	fn neighborhood_is_one_hop() {
		let data = sample();
		let out = select_neighborhood(1, &data);
		assert_eq!(ids(&out), HashSet::from([0, 1, 3]));
		assert!(out.links.iter().all(|l| l.touches(1)));
		assert!(select_neighborhood(77, &data).is_empty());
	}

	#[test]
	fn reveal_grows_with_the_step() {
		let data = sample();
		// Tomato's neighbours are Salad and Soup
		let none = reveal_neighborhood(1, &data, 0, 5);
		assert_eq!(ids(&none), HashSet::from([1]));
		assert!(none.links.is_empty());

		let half = reveal_neighborhood(1, &data, 3, 5);
		assert_eq!(ids(&half), HashSet::from([0, 1]));
		assert_eq!(half.links.len(), 1);

		let full = reveal_neighborhood(1, &data, 9, 5);
		assert_eq!(full, select_neighborhood(1, &data));
		assert!(reveal_neighborhood(77, &data, 5, 5).is_empty());
	}

	#[test]
	fn keywords_match_both_ways_and_expand_one_hop() {
		let data = sample();
		let mentions = mentioned_from_keywords(&["Tofu soup".into(), "".into()], &data);
		assert_eq!(mentions.keyword_ids, vec![4]);
		assert_eq!(mentions.mentioned_ids, vec![3, 4]);

		let mentions = mentioned_from_keywords(&["Tom".into()], &data);
		assert_eq!(mentions.keyword_ids, vec![1]);
		assert_eq!(mentions.mentioned_ids, vec![0, 1, 3]);
	}

	#[test]
	fn top_by_degree_prefers_first_seen_on_ties() {
		let data = sample();
		assert_eq!(degree_of(1, &data), 2);
		assert_eq!(top_by_degree(1, &data), HashSet::from([0]));
		assert_eq!(top_by_degree(3, &data), HashSet::from([0, 1, 3]));
		assert!(top_by_degree(0, &data).is_empty());
	}
}
