use std::ops::{Index, IndexMut};

use crate::config::{Attribute, DataSource, DataSourceId, DataSourceKind, EngineConfiguration, Headers, Mapping, Resolver};

/// The root operation types we generate resolvers for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum RootType {
    Query,
    Mutation,
}

impl RootType {
    /// Every root type, in the order their resolvers end up in the configuration
    pub const ALL: [RootType; 2] = [RootType::Query, RootType::Mutation];

    pub fn from_type_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// One value per root type
#[derive(Clone, Debug, Default)]
pub(crate) struct PerRoot<T> {
    query: T,
    mutation: T,
}

impl<T> Index<RootType> for PerRoot<T> {
    type Output = T;

    fn index(&self, root: RootType) -> &T {
        match root {
            RootType::Query => &self.query,
            RootType::Mutation => &self.mutation,
        }
    }
}

impl<T> IndexMut<RootType> for PerRoot<T> {
    fn index_mut(&mut self, root: RootType) -> &mut T {
        match root {
            RootType::Query => &mut self.query,
            RootType::Mutation => &mut self.mutation,
        }
    }
}

/// Holds the configuration while it's being built and owns every record created for it.
#[derive(Debug, Default)]
pub struct ConfigurationAccumulator {
    data_sources: Vec<DataSource>,
    resolvers: PerRoot<Option<Resolver>>,
    mappings: Vec<Mapping>,
}

impl ConfigurationAccumulator {
    /// Adds a data source whose default attributes hold `url`, plus the merged
    /// `extra_headers` when there are any.  Later duplicates of a header name win.
    pub fn create_data_source<K, V>(
        &mut self,
        name: &str,
        kind: DataSourceKind,
        url: &str,
        extra_headers: impl IntoIterator<Item = (K, V)>,
    ) -> DataSourceId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut default_attributes = vec![Attribute::url(url)];

        let headers = extra_headers
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect::<Headers>();

        if !headers.is_empty() {
            default_attributes.push(Attribute::headers(headers));
        }

        let id = DataSourceId(self.data_sources.len());
        self.data_sources.push(DataSource {
            kind,
            name: name.to_string(),
            default_attributes,
        });

        tracing::debug!("Created {kind} data source {name} at index {}", id.0);

        id
    }

    pub fn data_source(&self, id: DataSourceId) -> Option<&DataSource> {
        self.data_sources.get(id.0)
    }

    /// Creates the resolver for `root` unless it already exists.
    pub fn ensure_resolver(&mut self, root: RootType, data_source: DataSourceId, url: &str) -> &mut Resolver {
        self.resolvers[root].get_or_insert_with(|| {
            tracing::debug!("Created resolver for {root}");
            Resolver::new(root.to_string(), data_source, url)
        })
    }

    pub fn resolver_mut(&mut self, root: RootType) -> Option<&mut Resolver> {
        self.resolvers[root].as_mut()
    }

    pub fn resolver(&self, root: RootType) -> Option<&Resolver> {
        self.resolvers[root].as_ref()
    }

    /// The finished configuration, with resolvers in root type order.
    pub fn finalize(self) -> EngineConfiguration {
        let ConfigurationAccumulator {
            data_sources,
            mut resolvers,
            mappings,
        } = self;

        EngineConfiguration {
            data_sources,
            resolvers: RootType::ALL
                .into_iter()
                .filter_map(|root| resolvers[root].take())
                .collect(),
            mappings,
        }
    }
}
