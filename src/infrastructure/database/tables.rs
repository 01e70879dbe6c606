use crate::config::{HALF_PRECISION_DIMENSIONS, UNSUFFIXED_DIMENSIONS};

pub const SCHEMA: &str = "rag";

/// Storage type of the `embedding` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorColumn {
    Vector(usize),
    HalfVec(usize),
}

impl VectorColumn {
    pub fn for_dimensions(dimensions: usize) -> Self {
        if dimensions == HALF_PRECISION_DIMENSIONS {
            VectorColumn::HalfVec(dimensions)
        } else {
            VectorColumn::Vector(dimensions)
        }
    }

    /// SQL type a bound `vector` parameter is cast to before comparison.
    pub fn sql_type(&self) -> String {
        match self {
            VectorColumn::Vector(dimensions) => format!("vector({dimensions})"),
            VectorColumn::HalfVec(dimensions) => format!("halfvec({dimensions})"),
        }
    }
}

/// Fully qualified table names for one embedding dimensionality.
///
/// Each dimensionality lives in its own pair of tables, `files_{n}` and
/// `documents_{n}`, except 2000 which uses the bare names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    files: String,
    documents: String,
    vector_column: VectorColumn,
}

impl TableNames {
    pub fn for_dimensions(dimensions: usize) -> Self {
        let suffix = if dimensions == UNSUFFIXED_DIMENSIONS {
            String::new()
        } else {
            format!("_{dimensions}")
        };

        Self {
            files: format!("{SCHEMA}.files{suffix}"),
            documents: format!("{SCHEMA}.documents{suffix}"),
            vector_column: VectorColumn::for_dimensions(dimensions),
        }
    }

    pub fn files(&self) -> &str {
        &self.files
    }

    pub fn documents(&self) -> &str {
        &self.documents
    }

    pub fn vector_column(&self) -> VectorColumn {
        self.vector_column
    }
}
