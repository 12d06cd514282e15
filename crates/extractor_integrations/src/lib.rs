pub mod batch;
pub mod demo;
pub mod drive;
pub mod pipeline;
pub mod provider;

pub use batch::{BatchReport, extract_folder};
pub use demo::{DemoDocumentStore, DemoExtractionProvider};
pub use drive::{ContractSummary, DocumentStore, DriveFile, DriveFolder, find_folder};
pub use pipeline::{load_response_file, run_extraction};
pub use provider::{Credentials, DocumentRef, ExtractionProvider, ExtractionResponse, OutputRecord};
