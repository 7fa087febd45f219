use std::borrow::Cow;

use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};

pub trait YamlMappingExt<'input> {
    /// Looks up a value by its string key.
    fn field(&self, key: &str) -> Option<&Yaml<'input>>;
}

impl<'input> YamlMappingExt<'input> for LinkedHashMap<Yaml<'input>, Yaml<'input>> {
    fn field(&self, key: &str) -> Option<&Yaml<'input>> {
        self.get(&Yaml::Value(Scalar::String(Cow::Owned(key.to_owned()))))
    }
}
