mod yaml_ext;

pub use yaml_ext::YamlMappingExt;
