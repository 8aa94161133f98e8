pub mod confirm_dialog;
pub mod form_field;
pub mod loading;
pub mod stat_card;
pub mod transaction_form;
pub mod transaction_list;
