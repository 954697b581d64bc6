#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
	#[error(
		"malformed triples: {subjects} subjects, {relations} relations and {objects} objects"
	)]
	MalformedTriple {
		subjects: usize,
		relations: usize,
		objects: usize,
	},
	#[error("malformed triples: {categories} categories for {triples} triples")]
	MalformedCategories { categories: usize, triples: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
