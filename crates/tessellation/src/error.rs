/// The tessellators' result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    InvalidVertex,
    TooManyVertices,
}

impl std::fmt::Display for GeometryBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryBuilderError::InvalidVertex => {
                write!(f, "Invalid vertex")
            },
            GeometryBuilderError::TooManyVertices => {
                write!(f, "Too many vertices")
            }
        }
    }
}

impl std::error::Error for GeometryBuilderError {}

/// A polygon could not be triangulated.
///
/// Tessellators skip the polygon and carry on with the rest of the geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum TriangulationError {
    /// The triangulation primitive reported a failure.
    Failed(String),
    /// The triangulation primitive returned indices that don't describe a triangle list.
    InvalidIndices,
}

impl std::fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriangulationError::Failed(reason) => {
                write!(f, "Triangulation failed: {reason}")
            },
            TriangulationError::InvalidIndices => {
                write!(f, "Triangulation produced invalid indices")
            },
        }
    }
}

impl std::error::Error for TriangulationError {}

/// The tessellators' error enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    GeometryBuilder(GeometryBuilderError),
}

impl std::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessellationError::GeometryBuilder(e) => {
                write!(f, "Geometry builder error: {e}")
            },
        }
    }
}

impl std::error::Error for TessellationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TessellationError::GeometryBuilder(e) => Some(e),
        }
    }
}

impl std::convert::From<GeometryBuilderError> for TessellationError {
    fn from(value: GeometryBuilderError) -> Self {
        Self::GeometryBuilder(value)
    }
}

#[test]
fn error_messages() {
    let err: TessellationError = GeometryBuilderError::TooManyVertices.into();
    assert_eq!(err.to_string(), "Geometry builder error: Too many vertices");
    assert_eq!(
        TriangulationError::Failed("Invalid input".to_string()).to_string(),
        "Triangulation failed: Invalid input"
    );
}
