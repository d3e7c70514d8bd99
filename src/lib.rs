//! A catalog, selection, and hyperslab planning engine for hierarchical array datasets.
//!
//! Datasets in the style of netCDF-4 and HDF5 hold a tree of groups containing variables (n-dimensional arrays), named dimensions, and attributes.
//! `hypercat` builds an in-memory [`Catalog`](catalog::Catalog) of such a tree and answers the questions an extraction tool must answer before copying any data:
//! - which groups and variables do the user's selectors name ([`selection`]),
//! - which coordinate variable labels each dimension of each variable ([`coordinate`]),
//! - which indices of each dimension are visited, and in what order ([`slab`]),
//! - and where each extracted variable is written ([`selection::GroupPathEdit`]).
//!
//! Reading data, writing output, and file formats are left to the caller.
//! A dataset is exposed to the catalog through the [`CatalogProviderTraits`](provider::CatalogProviderTraits) trait, and [`MemoryProvider`](provider::MemoryProvider) is an in-memory implementation that can be deserialized from JSON.
//!
//! ## Example
//! ```rust
//! # use hypercat::{config::Config, extract::{Extraction, ExtractionRequest}, provider::MemoryProvider};
//! let provider = MemoryProvider::from_json(r#"{
//!     "dimensions": [{"name": "time", "size": 10, "unlimited": true}],
//!     "variables": [{"name": "time", "type": "double", "dimensions": ["time"]}],
//!     "groups": [{
//!         "name": "g1",
//!         "variables": [{"name": "temperature", "type": "float", "dimensions": ["time"]}]
//!     }]
//! }"#)?;
//!
//! let mut request = ExtractionRequest::new();
//! request.variable_selectors(["temperature"]).ranges(["time,8,2"]);
//! let plan = Extraction::new(Config::default()).run(&provider, &request)?;
//!
//! // the coordinate variable /time is extracted alongside /g1/temperature
//! assert_eq!(plan.output_paths().len(), 2);
//! // the wrapped range 8..2 visits the end of the record dimension, then its start
//! let time: Vec<u64> = plan.variable_plan("/g1/temperature").unwrap()[0].indices().collect();
//! assert_eq!(time, vec![8, 9, 0, 1, 2]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Features
//! #### Default
//!  - `regex`: regular expression selectors.
//!
//! ## Logging
//! Progress and advisory conditions are reported through [`tracing`]. No subscriber is installed by the library.

#![warn(unused_variables)]
#![warn(dead_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod catalog;
pub mod config;
pub mod coordinate;
pub mod extract;
pub mod node;
pub mod provider;
pub mod selection;
pub mod slab;
