//! Implements the CRUD operations and web routes for records, the money
//! movements the app tracks.

mod core;
mod create;
mod delete;
mod edit;
mod form;
mod list_page;

pub use core::{NewRecord, Record, RecordId, create_record, create_record_table, get_all_records};
pub use create::{CreateRecordState, create_record_endpoint, get_new_record_page};
pub use delete::delete_record_endpoint;
pub use edit::{get_edit_record_page, update_record_endpoint};
pub use list_page::{RecordsPageState, get_records_page};
