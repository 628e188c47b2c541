// * Engine-wide configuration defaults
// * Component configs (LoaderConfig, AggregatorConfig, ...) live next to the component they tune

pub mod constants;
