//! Integration tests for the web boundary.
//!
//! These tests demonstrate the complete flow from HTTP request collection
//! to caged, filtered reads.

use input_cage::web::{ExtractSources, FileUpload, RequestAdapter};
use input_cage::{CageOptions, Catalog, ErrorKind, Source, Validator, Value};

fn search_request() -> RequestAdapter {
    let mut adapter = RequestAdapter::new("req-public-001");
    adapter.add_query_param("search", "rust <b>cages</b>");
    adapter.add_query_param("page", "2abc");
    adapter.add_form_field("form[address][zip]", "62701");
    adapter.add_form_field("form[address][city]", "Springfield");
    adapter.add_form_field("tags[]", "donut");
    adapter.add_form_field("tags[]", "beer");
    adapter.add_cookie("session", "abc123");
    adapter.add_server_var("REQUEST_METHOD", "POST");
    adapter.add_env_var("APP_ENV", "test");
    adapter
}

#[test]
fn full_request_flow() {
    let cages = search_request().build_supercage(CageOptions::default(), Catalog::default());

    assert_eq!(
        cages.get().no_tags("search").unwrap().into_inner(),
        Value::text("rust cages")
    );
    assert_eq!(cages.get().get_int("page").unwrap().into_inner(), Value::from(2));
    assert_eq!(
        cages.post().test("form/address/zip", &Validator::Zip),
        Ok(true)
    );
    assert_eq!(
        cages.post().get_alpha("tags/1").unwrap().into_inner(),
        Value::text("beer")
    );
    assert_eq!(cages.cookie().test("session", &Validator::Alnum), Ok(true));
    assert_eq!(
        cages.server().get_alpha("REQUEST_METHOD").unwrap().into_inner(),
        Value::text("POST")
    );
    assert!(cages.env().key_exists("APP_ENV"));
    assert!(cages.files().is_empty());
}

#[test]
fn nested_form_fields_filter_as_a_tree() {
    let cages = search_request().build_supercage(CageOptions::default(), Catalog::default());

    let form = cages.post().get_alnum("form").unwrap().into_inner();
    let form = form.as_map().unwrap();

    assert_eq!(form.get_path("address/zip"), Some(&Value::text("62701")));
    assert_eq!(form.get_path("address/city"), Some(&Value::text("Springfield")));
}

#[test]
fn uploads_are_caged_like_any_input() {
    let mut adapter = RequestAdapter::new("req-upload-001");
    adapter.add_file(
        "avatar",
        FileUpload {
            name: "../../etc/passwd".to_string(),
            mime_type: "image/png".to_string(),
            tmp_name: "/tmp/upload-1".to_string(),
            error: 0,
            size: 512,
        },
    );

    let cages = adapter.build_supercage(CageOptions::default(), Catalog::default());

    assert_eq!(
        cages.files().no_path("avatar/name").unwrap().into_inner(),
        Value::text("passwd")
    );
    assert_eq!(
        cages.files().test("avatar/size", &Validator::Int),
        Ok(true)
    );
}

#[test]
fn raw_access_through_the_boundary_needs_opt_in() {
    let adapter = search_request();

    let closed = adapter.build_supercage(CageOptions::default(), Catalog::default());
    let open = adapter.build_supercage(CageOptions::new().keep_original(true), Catalog::default());

    assert_eq!(
        closed.get().get_raw("search").unwrap_err().kind(),
        ErrorKind::NotPermitted
    );
    assert_eq!(
        open.get().get_raw("search"),
        Ok(&Value::text("rust <b>cages</b>"))
    );
}

#[test]
fn overly_deep_names_never_reach_the_cage() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut adapter = RequestAdapter::new("req-deep-001").with_max_depth(3);
    adapter.add_query_param("a[b][c]", "ok");
    adapter.add_query_param("x[x][x][x][x][x][x][x]", "dropped");

    let cages = adapter.build_supercage(CageOptions::default(), Catalog::default());

    assert!(cages.get().key_exists("a/b/c"));
    assert!(!cages.get().key_exists("x"));
}

#[test]
fn extraction_does_not_consume_the_adapter() {
    let adapter = search_request();

    let first = adapter.extract_sources();
    let second = adapter.extract_sources();

    assert_eq!(first, second);
    assert_eq!(first.len(), Source::ALL.len());
}
