//! Error types for analysis and rendering operations.

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type for analysis operations
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// More networks were supplied than the palette has colours.
    #[error("Cannot fit {count} networks in one graph: palette holds {capacity} colours")]
    TooManyDatasets { count: usize, capacity: usize },

    /// The analyser was constructed without any network.
    #[error("At least one network is required")]
    NoDatasets,

    /// S-parameter label not of the form `S{row}{col}` with digits 1-9.
    #[error("Invalid S-parameter label '{0}': expected 'S' followed by two digits 1-9")]
    InvalidParameterLabel(String),

    /// Selected port does not exist in the network.
    #[error("Parameter {label} is out of range for a {ports}-port network")]
    PortOutOfRange { label: String, ports: usize },

    /// Statistics requested over a band with no samples.
    #[error("No samples of {parameter} in band for network '{network}'")]
    EmptySeries { network: String, parameter: String },

    /// Band id not present in the LTE band table.
    #[error("Cannot obtain definition for provided [{0}] Band")]
    UnknownBand(i64),

    /// Band id could not be interpreted as an integer.
    #[error("Band id '{0}' is not an integer")]
    InvalidBandId(String),

    /// Free-text band spec without a recognised unit (strict mode only).
    #[error("Unrecognized band spec '{0}': expected e.g. '700MHz-900MHz'")]
    UnrecognizedBandSpec(String),

    #[error("Invalid frequency span: start {start} is greater than stop {stop}")]
    InvalidFrequencySpan { start: f64, stop: f64 },

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Invalid calculator input: {0}")]
    InvalidCalculatorInput(String),

    /// Rendering backend failed to produce the image.
    #[error("Render error: {0}")]
    Render(String),

    /// Network file could not be loaded or decoded.
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
