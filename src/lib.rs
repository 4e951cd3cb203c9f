pub mod config;
pub mod location;
pub mod lookups;
pub mod modality;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod source;
pub mod status;
pub mod table;
pub mod text;
pub mod year;

pub use config::{validate_config, ConfigError, ConfigRoot};
pub use location::{parse_location, Location, LocationLevel};
pub use lookups::Lookups;
pub use modality::{classify_modality, Modality};
pub use pipeline::{normalize, NormalizedRecord, NOT_INFORMED};
pub use query::{
    aggregate, filter, map_points, AggregateResult, CentroidLookup, CountryCount, FilterOptions,
    FilterSpec, Kpis, LocationCount, MapPoint, ModalityCount, StatusFilter, YearFilter,
    YearStatusCount,
};
pub use report::{emit_dataset, sha256_hex, EmitError, EmitPaths};
pub use source::{load_centroids, CsvFileSource, SourceError, TableSource};
pub use status::is_in_force;
pub use table::{resolve_schema, RawTable, RawValue, Schema, SchemaError};
pub use text::fold;
pub use year::{infer_year, year_from_process_number};
