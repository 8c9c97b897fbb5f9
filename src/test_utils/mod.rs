#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::{
    create_test_category, create_test_transaction, get_test_app_state, get_test_connection,
    get_test_server,
};
pub(crate) use http::{assert_content_type, parse_json_body};
