//! Contig catalog storage and sequence extraction.
//!
//! A [`ContigCatalog`] is built once per assembly FASTA and is immutable
//! afterwards. It answers two questions for the location pipeline: how long is a
//! contig (for topology classification), and what bases lie between two 1-based
//! coordinates (for homology search).
//!
//! ## Example
//!
//! ```rust
//! use amr_locator::catalog::extract::extract;
//! use amr_locator::catalog::store::ContigCatalog;
//! use amr_locator::core::contig::ContigRecord;
//!
//! let catalog = ContigCatalog::from_records(vec![ContigRecord::new("contig_1", b"AACCGGTT".to_vec())]);
//!
//! assert_eq!(catalog.length("contig_1"), Some(8));
//! assert_eq!(extract(&catalog, "contig_1", 3, 6).as_deref(), Some("CCGG"));
//! assert_eq!(extract(&catalog, "contig_9", 1, 4), None);
//! ```
//!
//! [`ContigCatalog`]: store::ContigCatalog

pub mod extract;
pub mod store;
