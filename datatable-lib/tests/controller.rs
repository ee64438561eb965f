//! Integration tests for the table controller.
//!
//! Every test mounts a controller with a recording dispatcher and drives it
//! the way an embedding application would: interactions in, fetch actions
//! out, responses back in.

use std::sync::Arc;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde_json::json;

use datatable_lib::TableController;
use datatable_lib::TableStatus;
use datatable_lib::config::ColumnDeclaration;
use datatable_lib::config::TableConfiguration;
use datatable_lib::controller::DEFAULT_ERROR_MESSAGE;
use datatable_lib::dispatch::ActionKind;
use datatable_lib::dispatch::FetchAction;
use datatable_lib::error::ConfigError;
use datatable_lib::fetch::FetchResponse;
use datatable_lib::fetch::FetchResult;
use datatable_lib::fetch::Row;
use datatable_lib::filter::Comparator;
use datatable_lib::filter::DateRange;
use datatable_lib::filter::FilterValue;
use datatable_lib::filter::NumberFilter;
use datatable_lib::sort::Direction;

const SETTINGS: &str = r#"{
    "tableID": "ExampleDataTable",
    "wrapperType": "section",
    "displayTitle": "Requests Table",
    "keyField": "request_id",
    "defaultSort": ["request_id", "desc"],
    "minWidth": 880,
    "tableColumns": [
        { "title": "Ref", "key": "request_id", "filter": "NumberFilter", "defaultValue": { "comparator": "=" }, "width": 74 },
        { "title": "User ID", "key": "user_id", "filter": "NumberFilter", "defaultValue": { "comparator": "=" }, "width": 74, "export": false },
        { "title": "First Name", "key": "first_name", "width": 90 },
        { "title": "Last Name", "key": "surname", "width": 90 },
        { "title": "Email Address", "key": "email", "width": 164 },
        { "title": "Request Date", "key": "created_at", "filter": "CustomDateRangeFilter", "disableSearchAll": true, "width": 120 },
        { "title": "Type", "key": "type", "filter": "SelectFilter", "filterOptions": { "Add": "Add", "Amend": "Amend", "Remove": "Remove" } },
        { "title": "System", "key": "system_type", "filter": "SelectFilter", "filterOptions": { "training": "training", "staging": "staging", "production": "production" } },
        { "title": "Actions", "key": "actions", "searchable": false, "sortable": false, "export": false }
    ]
}"#;

type Outbox = Arc<Mutex<Vec<FetchAction>>>;

fn settings() -> TableConfiguration {
    TableConfiguration::from_json(SETTINGS).unwrap()
}

fn mount(config: TableConfiguration) -> (TableController, Outbox) {
    let outbox: Outbox = Arc::default();
    let sent = outbox.clone();
    let controller = TableController::builder()
        .config(config)
        .api_location("fake/location")
        .dispatcher(move |action: FetchAction| sent.lock().unwrap().push(action))
        .mount();
    (controller, outbox)
}

fn sent(outbox: &Outbox) -> usize {
    outbox.lock().unwrap().len()
}

fn last(outbox: &Outbox) -> FetchAction {
    outbox.lock().unwrap().last().cloned().unwrap()
}

fn row() -> Row {
    json!({
        "request_id": 1,
        "user_id": 7,
        "first_name": "Ted",
        "surname": "Stevens",
        "email": "ted.stevens@test.com",
        "created_at": "2018-09-18 03:13:39",
        "type": "Add",
        "system_type": "staging",
        "actions": "4"
    })
    .as_object()
    .cloned()
    .unwrap()
}

/// Mounts a controller and answers its first request with 119 rows.
fn mount_loaded(config: TableConfiguration) -> (TableController, Outbox) {
    let (mut controller, outbox) = mount(config);
    let first = last(&outbox);
    assert!(controller.receive(FetchResponse::for_action(&first, FetchResult::success(vec![row()], 119))));
    (controller, outbox)
}

// =============================================================================
// Mount
// =============================================================================

mod mounting {
    use super::*;

    #[test]
    fn test_mount_fires_first_request() {
        let (controller, outbox) = mount(settings());

        assert_eq!(sent(&outbox), 1);
        let action = last(&outbox);
        assert_eq!(action.table_id, "ExampleDataTable");
        assert_eq!(action.api_location, "fake/location");
        assert_eq!(action.kind, ActionKind::Page { sequence: 1 });
        assert_eq!(action.request.page, 1);
        assert_eq!(action.request.page_size, 10);
        assert!(action.request.filters.is_empty());

        let sort = action.request.sort.unwrap();
        assert_eq!(sort.column, "request_id");
        assert_eq!(sort.direction, Direction::Desc);

        assert_eq!(controller.status(), TableStatus::Loading);
    }

    #[test]
    fn test_pagination_with_zero_results() {
        let (controller, _) = mount(settings());
        let view = controller.view();
        let table = view.table().unwrap();

        assert_eq!(table.total_text, "Showing 0 to 0 of 0 Results");
        assert_eq!(table.page_count, 1);
    }

    #[test]
    fn test_display_title() {
        let (controller, _) = mount(settings());
        assert_eq!(controller.view().title.as_deref(), Some("Requests Table"));
    }

    #[test]
    fn test_loading_until_first_response() {
        let (mut controller, outbox) = mount(settings());
        let table = controller.view().table().cloned().unwrap();
        assert!(table.loading);
        assert!(table.fetching);

        let first = last(&outbox);
        controller.receive(FetchResponse::for_action(&first, FetchResult::success(vec![], 0)));

        let table = controller.view().table().cloned().unwrap();
        assert!(!table.loading);
        assert!(!table.fetching);
        assert_eq!(controller.status(), TableStatus::Ready);
    }

    #[test]
    fn test_page_size_from_configuration() {
        let (_, outbox) = mount(settings().with_page_size(25));
        assert_eq!(last(&outbox).request.page_size, 25);
    }
}

// =============================================================================
// Results
// =============================================================================

mod results {
    use super::*;

    #[test]
    fn test_pagination_with_119_results() {
        let (controller, _) = mount_loaded(settings());
        assert_eq!(controller.status(), TableStatus::Ready);
        assert_eq!(
            controller.view().table().unwrap().total_text,
            "Showing 1 to 10 of 119 Results"
        );
    }

    #[test]
    fn test_custom_pagination_total() {
        let (mut controller, outbox) = mount_loaded(settings());
        let before = sent(&outbox);

        controller.reconfigure(
            settings().with_total_renderer(|from, to, total| format!("{}-{} of {}", from, to, total)),
        );

        assert_eq!(controller.view().table().unwrap().total_text, "1-10 of 119");
        assert_eq!(sent(&outbox), before);
    }

    #[test]
    fn test_rows_and_columns() {
        let (controller, _) = mount_loaded(settings());
        let view = controller.view();
        let table = view.table().unwrap();

        assert_eq!(table.key_field, "request_id");
        assert_eq!(table.min_width, Some(880));
        assert_eq!(table.columns[0].title, "Ref");
        assert_eq!(table.columns[4].title, "Email Address");
        assert_eq!(table.columns[7].title, "System");

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0]["request_id"], json!(1));
        assert_eq!(table.rows[0]["email"], json!("ted.stevens@test.com"));
        assert_eq!(table.rows[0]["system_type"], json!("staging"));
    }

    #[test]
    fn test_published_result_without_sequence() {
        let (mut controller, _) = mount(settings());

        assert!(controller.receive(FetchResponse::published(
            "ExampleDataTable",
            FetchResult::success(vec![row()], 119),
        )));
        assert_eq!(controller.status(), TableStatus::Ready);
        assert!(!controller.view().table().unwrap().fetching);
    }

    #[test]
    fn test_response_for_other_table_is_ignored() {
        let (mut controller, _) = mount(settings());

        assert!(!controller.receive(FetchResponse::published(
            "OtherTable",
            FetchResult::success(vec![row()], 119),
        )));
        assert_eq!(controller.status(), TableStatus::Loading);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let (mut controller, outbox) = mount(settings());
        let first = last(&outbox);

        assert!(controller.set_search("ted"));
        let second = last(&outbox);

        assert!(controller.receive(FetchResponse::for_action(&second, FetchResult::success(vec![row()], 1))));
        assert!(!controller.receive(FetchResponse::for_action(&first, FetchResult::success(vec![], 119))));

        assert_eq!(controller.pagination().unwrap().total_rows(), 1);
        assert_eq!(controller.result().data.len(), 1);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let (mut controller, outbox) = mount_loaded(settings());
        assert!(controller.go_to_page(12));
        let on_twelve = last(&outbox);

        controller.receive(FetchResponse::for_action(&on_twelve, FetchResult::success(vec![], 35)));

        assert_eq!(controller.pagination().unwrap().page(), 4);
        assert_eq!(last(&outbox).request.page, 4);
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    fn failure() -> FetchResult {
        FetchResult::failure(json!({ "test": "error" }))
    }

    #[test]
    fn test_default_error() {
        let (mut controller, _) = mount(settings());
        controller.receive(FetchResponse::published("ExampleDataTable", failure()));

        let view = controller.view();
        assert_eq!(view.status, TableStatus::Error);
        assert_eq!(view.failure_text(), Some(DEFAULT_ERROR_MESSAGE));
        assert!(view.table().is_none());
        assert_eq!(
            DEFAULT_ERROR_MESSAGE,
            "The table failed to initialise. Please check you are connected to the internet and try again."
        );
    }

    #[test]
    fn test_custom_error() {
        let config = settings().with_error_renderer(|payload| payload["test"].as_str().unwrap_or_default().to_string());
        let (mut controller, _) = mount(config);
        controller.receive(FetchResponse::published("ExampleDataTable", failure()));

        assert_eq!(controller.view().failure_text(), Some("error"));
    }

    #[test]
    fn test_next_request_leaves_error_state() {
        let (mut controller, outbox) = mount(settings());
        controller.receive(FetchResponse::published("ExampleDataTable", failure()));
        assert!(controller.status().is_error());

        assert!(controller.refresh());
        assert_eq!(controller.status(), TableStatus::Loading);

        controller.receive(FetchResponse::for_action(&last(&outbox), FetchResult::success(vec![row()], 119)));
        assert_eq!(controller.status(), TableStatus::Ready);
        assert!(controller.view().failure_text().is_none());
    }

    #[test]
    fn test_failure_keeps_previous_total() {
        let (mut controller, _) = mount_loaded(settings());
        controller.receive(FetchResponse::published("ExampleDataTable", failure()));

        assert_eq!(controller.pagination().unwrap().total_rows(), 119);
    }
}

// =============================================================================
// Missing table identifier
// =============================================================================

mod missing_table_id {
    use super::*;

    fn assert_uninitialized(config: TableConfiguration) {
        let (mut controller, outbox) = mount(config);

        assert_eq!(
            controller.status(),
            TableStatus::Uninitialized {
                reason: ConfigError::MissingTableId
            }
        );
        assert_eq!(controller.view().failure_text(), Some("Missing table identifier"));

        assert!(!controller.set_search("ted"));
        assert!(!controller.apply_sort("email"));
        assert!(!controller.refresh());
        assert!(!controller.export());
        controller.reconfigure(settings());

        assert_eq!(sent(&outbox), 0);
        assert!(controller.status().is_uninitialized());
    }

    #[test]
    fn test_no_table_id() {
        let mut config = settings();
        config.table_id = None;
        assert_uninitialized(config);
    }

    #[test]
    fn test_blank_table_id() {
        let mut config = settings();
        config.table_id = Some(String::new());
        assert_uninitialized(config);
    }

    #[test]
    fn test_whitespace_table_id() {
        let mut config = settings();
        config.table_id = Some("   ".to_string());
        assert_uninitialized(config);
    }
}

// =============================================================================
// Toolbar
// =============================================================================

mod toolbar {
    use super::*;

    #[test]
    fn test_refresh_records_increasing_timestamps() {
        let (mut controller, outbox) = mount(settings());
        assert_eq!(controller.last_refreshed_at(), None);

        assert!(controller.refresh());
        let first = controller.last_refreshed_at().unwrap();
        assert!(controller.refresh());
        let second = controller.last_refreshed_at().unwrap();

        assert!(second > first);
        assert_eq!(sent(&outbox), 3);
        assert_eq!(last(&outbox).refreshed_at, Some(second));
        assert_eq!(last(&outbox).request, outbox.lock().unwrap()[0].request);
    }

    #[test]
    fn test_toggle_filters() {
        let (mut controller, _) = mount(settings());
        let row = |c: &TableController| c.view().table().unwrap().filter_row.clone().unwrap();

        assert!(!row(&controller).visible);
        assert_eq!(row(&controller).filters.len(), 8);

        assert!(controller.toggle_filters());
        assert!(row(&controller).visible);

        assert!(!controller.toggle_filters());
        assert!(!row(&controller).visible);
    }

    #[test]
    fn test_export_button() {
        let (controller, _) = mount(settings());
        assert!(controller.view().table().unwrap().show_export);
    }

    #[test]
    fn test_no_export_columns() {
        let columns = ["request_id", "email"]
            .map(|key| ColumnDeclaration::new(key, key).with_exportable(false));
        let (mut controller, outbox) = mount(TableConfiguration::new("ExampleDataTable").with_columns(columns));

        assert!(!controller.view().table().unwrap().show_export);
        assert!(!controller.export());
        assert_eq!(sent(&outbox), 1);
    }

    #[test]
    fn test_single_exportable_column() {
        let config = TableConfiguration::new("ExampleDataTable").with_columns([
            ColumnDeclaration::new("request_id", "Ref").with_exportable(false),
            ColumnDeclaration::new("email", "Email Address"),
        ]);
        let (controller, _) = mount(config);
        assert!(controller.view().table().unwrap().show_export);
    }

    #[test]
    fn test_export_action() {
        let (mut controller, outbox) = mount_loaded(settings());
        assert!(controller.go_to_page(3));

        assert!(controller.export());
        let action = last(&outbox);

        assert!(action.is_export());
        assert_eq!(action.request.page, 1);
        assert_eq!(action.request.page_size, 119);
        match action.kind {
            ActionKind::Export { columns } => {
                assert!(!columns.contains(&"user_id".to_string()));
                assert!(!columns.contains(&"actions".to_string()));
                assert_eq!(columns.len(), 7);
            }
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(controller.pagination().unwrap().page(), 3);
    }
}

// =============================================================================
// Search
// =============================================================================

mod search {
    use super::*;

    #[test]
    fn test_empty_search_input() {
        let (controller, _) = mount(settings());
        let search = controller.view().table().unwrap().search.clone().unwrap();
        assert_eq!(search.term, "");
    }

    #[test]
    fn test_default_search_term() {
        let (controller, outbox) = mount(settings().with_default_search("ted"));

        assert_eq!(controller.search_term(), Some("ted"));
        let search = last(&outbox).request.search.unwrap();
        assert_eq!(search.term, "ted");
        assert!(!search.columns.contains(&"created_at".to_string()));
        assert!(!search.columns.contains(&"actions".to_string()));
    }

    #[test]
    fn test_no_searchable_columns() {
        let columns = ["request_id", "email"]
            .map(|key| ColumnDeclaration::new(key, key).with_searchable(false));
        let (mut controller, _) = mount(TableConfiguration::new("ExampleDataTable").with_columns(columns));

        let view = controller.view();
        let table = view.table().unwrap();
        assert!(table.search.is_none());
        assert!(table.filter_row.is_none());
        assert!(!controller.toggle_filters());
        assert!(!controller.set_search("ted"));
    }

    #[test]
    fn test_single_searchable_column() {
        let config = TableConfiguration::new("ExampleDataTable").with_columns([
            ColumnDeclaration::new("request_id", "Ref").with_searchable(false),
            ColumnDeclaration::new("email", "Email Address"),
        ]);
        let (controller, _) = mount(config);
        let view = controller.view();
        let table = view.table().unwrap();

        assert_eq!(table.search.as_ref().map(|s| s.term.as_str()), Some(""));
        assert_eq!(table.filter_row.as_ref().map(|row| row.filters.len()), Some(1));
    }

    #[test]
    fn test_search_resets_page() {
        let (mut controller, outbox) = mount_loaded(settings());
        assert!(controller.go_to_page(5));

        assert!(controller.set_search("ted"));
        assert_eq!(controller.pagination().unwrap().page(), 1);
        assert_eq!(last(&outbox).request.page, 1);
    }

    #[test]
    fn test_unchanged_search_does_not_refetch() {
        let (mut controller, outbox) = mount(settings());
        assert!(controller.set_search(""));
        assert_eq!(sent(&outbox), 1);
    }
}

// =============================================================================
// Filters
// =============================================================================

mod filters {
    use super::*;

    fn settings_with_defaults() -> TableConfiguration {
        let mut config = settings();
        for column in &mut config.columns {
            column.default_value = match column.key.as_str() {
                "request_id" => Some(FilterValue::number(Comparator::Eq, 66.0)),
                "first_name" => Some(FilterValue::text("Dave")),
                "created_at" => Some(FilterValue::date_range(
                    NaiveDate::from_ymd_opt(2017, 1, 1),
                    NaiveDate::from_ymd_opt(2017, 1, 2),
                )),
                "type" => Some(FilterValue::text("Amend")),
                _ => column.default_value.take(),
            };
        }
        config
    }

    #[test]
    fn test_empty_column_filters() {
        let (controller, _) = mount(settings());
        let view = controller.view();
        let row = view.table().unwrap().filter_row.clone().unwrap();

        assert_eq!(
            row.value("request_id"),
            Some(&FilterValue::Number(NumberFilter::with_comparator(Comparator::Eq)))
        );
        assert_eq!(row.value("first_name"), Some(&FilterValue::text("")));
        assert_eq!(row.value("created_at"), Some(&FilterValue::DateRange(DateRange::default())));
        assert_eq!(row.value("type"), Some(&FilterValue::select("")));
        assert_eq!(row.value("actions"), None);
    }

    #[test]
    fn test_default_values() {
        let (controller, outbox) = mount(settings_with_defaults());
        let view = controller.view();
        let row = view.table().unwrap().filter_row.clone().unwrap();

        assert_eq!(row.value("request_id"), Some(&FilterValue::number(Comparator::Eq, 66.0)));
        assert_eq!(row.value("first_name"), Some(&FilterValue::text("Dave")));
        assert_eq!(
            row.value("created_at"),
            Some(&FilterValue::date_range(
                NaiveDate::from_ymd_opt(2017, 1, 1),
                NaiveDate::from_ymd_opt(2017, 1, 2),
            ))
        );
        assert_eq!(row.value("type"), Some(&FilterValue::select("Amend")));

        let filters = last(&outbox).request.filters;
        assert_eq!(filters.len(), 4);
        assert!(!filters.contains_key("user_id"));
    }

    #[test]
    fn test_clear_filters() {
        let (mut controller, outbox) = mount(settings_with_defaults());

        assert!(controller.clear_filters());
        let view = controller.view();
        let row = view.table().unwrap().filter_row.clone().unwrap();

        assert_eq!(
            row.value("request_id"),
            Some(&FilterValue::Number(NumberFilter::with_comparator(Comparator::Eq)))
        );
        assert_eq!(row.value("first_name"), Some(&FilterValue::text("")));
        assert_eq!(row.value("created_at"), Some(&FilterValue::DateRange(DateRange::default())));
        assert_eq!(row.value("type"), Some(&FilterValue::select("")));
        assert!(last(&outbox).request.filters.is_empty());
    }

    #[test]
    fn test_set_filter_resets_page() {
        let (mut controller, outbox) = mount_loaded(settings());
        assert!(controller.go_to_page(4));

        assert!(controller.set_filter("type", FilterValue::select("Remove")));

        let request = last(&outbox).request;
        assert_eq!(request.page, 1);
        assert_eq!(request.filters.get("type"), Some(&FilterValue::select("Remove")));
    }

    #[test]
    fn test_rejected_filter_changes_nothing() {
        let (mut controller, outbox) = mount(settings());
        let before = controller.filters().cloned();

        assert!(!controller.set_filter("type", FilterValue::select("Delete")));
        assert!(!controller.set_filter("actions", FilterValue::text("4")));
        assert!(!controller.set_filter("request_id", FilterValue::text("66")));
        assert!(!controller.set_filter("missing", FilterValue::text("x")));

        assert_eq!(controller.filters().cloned(), before);
        assert_eq!(sent(&outbox), 1);
    }

    #[test]
    fn test_default_of_wrong_kind_is_configuration_error() {
        let mut config = settings();
        config.columns[0].default_value = Some(FilterValue::text("66"));
        let (controller, outbox) = mount(config);

        assert!(matches!(
            controller.status(),
            TableStatus::Uninitialized {
                reason: ConfigError::DefaultKindMismatch { .. }
            }
        ));
        assert_eq!(sent(&outbox), 0);
    }
}

// =============================================================================
// Sorting and pagination
// =============================================================================

mod sorting_and_paging {
    use super::*;

    #[test]
    fn test_sort_toggles_direction() {
        let (mut controller, outbox) = mount(settings());

        assert!(controller.apply_sort("request_id"));
        assert_eq!(last(&outbox).request.sort.unwrap().direction, Direction::Asc);

        assert!(controller.apply_sort("email"));
        let sort = last(&outbox).request.sort.unwrap();
        assert_eq!(sort.column, "email");
        assert_eq!(sort.direction, Direction::Asc);
    }

    #[test]
    fn test_sort_on_unsortable_column_is_rejected() {
        let (mut controller, outbox) = mount(settings());

        assert!(!controller.apply_sort("actions"));
        assert_eq!(controller.sort().unwrap().column(), Some("request_id"));
        assert_eq!(sent(&outbox), 1);
    }

    #[test]
    fn test_sort_keeps_page() {
        let (mut controller, _) = mount_loaded(settings());
        assert!(controller.go_to_page(3));
        assert!(controller.apply_sort("email"));
        assert_eq!(controller.pagination().unwrap().page(), 3);
    }

    #[test]
    fn test_page_out_of_range_is_rejected() {
        let (mut controller, outbox) = mount_loaded(settings());
        assert!(controller.go_to_page(12));
        let before = sent(&outbox);

        assert!(!controller.go_to_page(13));
        assert!(!controller.go_to_page(0));

        assert_eq!(controller.pagination().unwrap().page(), 12);
        assert_eq!(sent(&outbox), before);
        assert_eq!(
            controller.view().table().unwrap().total_text,
            "Showing 111 to 119 of 119 Results"
        );
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let (mut controller, outbox) = mount_loaded(settings());
        assert!(controller.go_to_page(6));

        assert!(controller.set_page_size(50));
        let request = last(&outbox).request;
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 50);
        assert_eq!(controller.view().table().unwrap().page_count, 3);

        assert!(!controller.set_page_size(0));
        assert_eq!(controller.pagination().unwrap().page_size(), 50);
    }

    #[test]
    fn test_sequences_increase() {
        let (mut controller, outbox) = mount(settings());
        controller.apply_sort("email");
        controller.set_search("ted");

        let sequences: Vec<_> = outbox.lock().unwrap().iter().filter_map(FetchAction::sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }
}

// =============================================================================
// Reconfiguration
// =============================================================================

mod reconfiguration {
    use super::*;

    #[test]
    fn test_same_table_keeps_entered_state() {
        let (mut controller, outbox) = mount_loaded(settings());
        controller.set_filter("first_name", FilterValue::text("Ted"));
        controller.apply_sort("email");
        let before = sent(&outbox);

        let mut config = settings();
        config.columns.retain(|c| c.key != "surname");
        controller.reconfigure(config);

        assert_eq!(controller.filters().unwrap().get("first_name"), Some(&FilterValue::text("Ted")));
        assert_eq!(controller.sort().unwrap().column(), Some("email"));
        assert_eq!(controller.status(), TableStatus::Ready);
        assert_eq!(sent(&outbox), before);
    }

    fn defaults(name: &str, sort: &str, search: &str) -> TableConfiguration {
        TableConfiguration::new("ExampleDataTable")
            .with_default_sort(sort, Direction::Desc)
            .with_default_search(search)
            .with_columns([
                ColumnDeclaration::new("a", "A").with_default(FilterValue::text(name)),
                ColumnDeclaration::new("b", "B"),
            ])
    }

    #[test]
    fn test_untouched_defaults_follow_new_configuration() {
        let (mut controller, outbox) = mount(defaults("Dave", "a", "x"));

        controller.reconfigure(defaults("Ted", "b", "y"));

        assert_eq!(controller.filters().unwrap().get("a"), Some(&FilterValue::text("Ted")));
        let sort = controller.sort().unwrap();
        assert_eq!((sort.column(), sort.direction()), (Some("b"), Direction::Desc));
        assert_eq!(controller.search_term(), Some("y"));

        let request = last(&outbox).request;
        assert_eq!(request.filters.get("a"), Some(&FilterValue::text("Ted")));
        assert_eq!(request.search.unwrap().term, "y");
    }

    #[test]
    fn test_entered_values_survive_new_defaults() {
        let (mut controller, _outbox) = mount(defaults("Dave", "a", "x"));
        controller.set_filter("a", FilterValue::text("Stevens"));
        controller.apply_sort("a");
        controller.set_search("ted");

        controller.reconfigure(defaults("Ted", "b", "y"));

        assert_eq!(controller.filters().unwrap().get("a"), Some(&FilterValue::text("Stevens")));
        let sort = controller.sort().unwrap();
        assert_eq!((sort.column(), sort.direction()), (Some("a"), Direction::Asc));
        assert_eq!(controller.search_term(), Some("ted"));
    }

    #[test]
    fn test_removed_sort_column_falls_back_to_default() {
        let (mut controller, outbox) = mount(settings());
        controller.apply_sort("email");

        let mut config = settings();
        config.columns.retain(|c| c.key != "email");
        controller.reconfigure(config);

        let sort = last(&outbox).request.sort.unwrap();
        assert_eq!(sort.column, "request_id");
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn test_other_table_starts_over() {
        let (mut controller, outbox) = mount_loaded(settings());
        controller.set_filter("first_name", FilterValue::text("Ted"));

        let mut config = settings();
        config.table_id = Some("OtherTable".to_string());
        controller.reconfigure(config);

        let action = last(&outbox);
        assert_eq!(action.table_id, "OtherTable");
        assert!(action.request.filters.is_empty());
        assert_eq!(controller.status(), TableStatus::Loading);
        assert!(controller.view().table().unwrap().loading);
    }

    #[test]
    fn test_invalid_reconfiguration_is_terminal() {
        let (mut controller, outbox) = mount(settings());

        let mut config = settings();
        config.table_id = None;
        controller.reconfigure(config);
        assert!(controller.status().is_uninitialized());

        controller.reconfigure(settings());
        assert!(controller.status().is_uninitialized());
        assert_eq!(sent(&outbox), 1);
    }

    #[test]
    fn test_configured_page_size_change() {
        let (mut controller, outbox) = mount_loaded(settings());
        controller.go_to_page(3);

        controller.reconfigure(settings().with_page_size(20));

        let request = last(&outbox).request;
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 20);
    }
}
