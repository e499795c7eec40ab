pub mod header;
pub mod result_dialog;
pub mod review_form;
pub mod toast;
pub mod upload_area;
