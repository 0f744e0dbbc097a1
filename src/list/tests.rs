use super::*;
use crate::bindings::EventSource;
use crate::config::{PaginationConfig, PaginationOption, SearchConfig, SearchKeys, SearchOption};
use crate::debounce::DebounceMsg;
use crate::error::{ConfigError, DataError};
use crate::loader::{DataSource, NoFetcher};
use crate::paginator::PageControlKind;
use crate::record::Record;
use crate::surface::{MemorySurface, Region};
use std::sync::Arc;

fn numbered(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|n| Record::new().with("name", format!("Item {}", n)).with("rank", n as i64))
        .collect()
}

fn catalogue() -> Vec<Record> {
    vec![
        Record::new().with("name", "Widget").with("category", "Tools"),
        Record::new().with("name", "Gadget").with("category", "Toys"),
        Record::new().with("name", "Sprocket").with("category", "Parts"),
        Record::new().with("name", "Toolbox").with("category", Option::<&str>::None),
    ]
}

fn name_template(record: &Record) -> String {
    format!("<li>{}</li>", record.text("name").unwrap_or_default())
}

fn builder(records: Vec<Record>) -> Builder<MemorySurface> {
    Model::builder()
        .container(MemorySurface::new())
        .data(DataSource::records(records))
        .item_template(name_template)
        .fetcher(Arc::new(NoFetcher))
}

fn searchable(keys: Vec<&str>) -> SearchOption {
    SearchOption::Custom(SearchConfig {
        keys: Some(SearchKeys::from(keys)),
        ..SearchConfig::default()
    })
}

fn paged(per_page: i64) -> PaginationOption {
    PaginationOption::Custom(PaginationConfig {
        enabled: None,
        items_per_page: Some(per_page),
    })
}

fn loaded(builder: Builder<MemorySurface>) -> Model<MemorySurface> {
    let mut list = builder.build().unwrap();
    futures::executor::block_on(list.load()).unwrap();
    list
}

fn names(list: &Model<MemorySurface>) -> Vec<String> {
    list.filtered()
        .iter()
        .filter_map(|r| r.text("name"))
        .collect()
}

#[test]
fn builder_requires_container_data_and_template() {
    let missing_container = Model::<MemorySurface>::builder()
        .data(DataSource::records(vec![]))
        .item_template(name_template)
        .build();
    assert!(matches!(missing_container, Err(ConfigError::MissingContainer)));

    let missing_data = Model::builder()
        .container(MemorySurface::new())
        .item_template(name_template)
        .build();
    assert!(matches!(missing_data, Err(ConfigError::MissingData)));

    let missing_template = Model::builder()
        .container(MemorySurface::new())
        .data(DataSource::records(vec![]))
        .build();
    assert!(matches!(missing_template, Err(ConfigError::MissingItemTemplate)));
}

#[test]
fn load_renders_every_record_without_pagination() {
    let list = loaded(builder(numbered(25)));
    assert_eq!(list.lifecycle(), Lifecycle::Ready);
    assert_eq!(list.surface().fragments(Region::Items).len(), 25);
    assert!(list.surface().fragments(Region::Pagination).is_empty());
    assert_eq!(list.current_page_slice().len(), 25);
}

#[test]
fn empty_query_restores_the_dataset() {
    let mut list = loaded(builder(catalogue()).search(searchable(vec!["name"])));
    list.search("widget");
    assert_eq!(list.filtered().len(), 1);

    list.search("");
    assert_eq!(list.filtered(), list.dataset());
    list.search("   ");
    assert_eq!(list.filtered(), list.dataset());
}

#[test]
fn exact_field_value_is_always_found() {
    let mut list = loaded(builder(catalogue()).search(searchable(vec!["name", "category"])));
    for record in catalogue() {
        let name = record.text("name").unwrap();
        list.search(&name);
        assert!(list.filtered().contains(&record), "{}", name);
    }
}

#[test]
fn multi_field_search_is_case_insensitive() {
    let mut list = loaded(builder(catalogue()).search(searchable(vec!["name", "category"])));
    list.search("tool");
    // "Widget" matches on category, "Toolbox" on name; its null category is skipped.
    assert_eq!(names(&list), vec!["Widget", "Toolbox"]);

    list.search("TOY");
    assert_eq!(names(&list), vec!["Gadget"]);
}

#[test]
fn fields_outside_the_search_keys_do_not_match() {
    let mut list = loaded(builder(catalogue()).search(searchable(vec!["name"])));
    list.search("parts");
    assert!(list.filtered().is_empty());
}

#[test]
fn numbers_are_matched_by_their_text() {
    let mut list = loaded(builder(numbered(12)).search(searchable(vec!["rank"])));
    list.search("1");
    // 1, 10, 11, 12
    assert_eq!(list.filtered().len(), 4);
}

#[test]
fn twenty_five_records_page_by_ten() {
    let mut list = loaded(builder(numbered(25)).pagination(paged(10)));
    assert_eq!(list.total_pages(), 3);

    let expect = |list: &Model<MemorySurface>, first: usize, len: usize| {
        let slice = list.current_page_slice();
        assert_eq!(slice.len(), len);
        assert_eq!(slice[0].text("name"), Some(format!("Item {}", first)));
    };
    expect(&list, 1, 10);
    list.go_to_page(2);
    expect(&list, 11, 10);
    list.go_to_page(3);
    expect(&list, 21, 5);
    assert_eq!(list.surface().fragments(Region::Items).len(), 5);
}

#[test]
fn out_of_range_pages_change_nothing() {
    let mut list = loaded(builder(numbered(25)).pagination(paged(10)));
    list.go_to_page(2);
    let before = list.surface().clone();

    list.go_to_page(0);
    list.go_to_page(4);
    assert_eq!(list.page(), 2);
    assert_eq!(list.surface(), &before);
}

#[test]
fn render_is_idempotent() {
    let mut list = loaded(builder(numbered(25)).pagination(paged(10)));
    list.go_to_page(2);
    list.render();
    let first = list.surface().clone();
    let bindings = list.bindings().len();

    list.render();
    assert_eq!(list.surface(), &first);
    assert_eq!(list.bindings().len(), bindings);
}

#[test]
fn search_returns_to_the_first_page() {
    let mut list = loaded(
        builder(numbered(25))
            .search(searchable(vec!["name"]))
            .pagination(paged(10)),
    );
    list.go_to_page(3);
    list.search("item");
    assert_eq!(list.page(), 1);
    assert_eq!(list.total_pages(), 3);

    list.search("item 2");
    // Item 2, Item 20..=25
    assert_eq!(list.filtered().len(), 7);
    assert_eq!(list.total_pages(), 1);
    assert!(list.surface().fragments(Region::Pagination).is_empty());
}

#[test]
fn empty_dataset_and_empty_results_read_differently() {
    let messages = Messages::default();

    let empty = loaded(builder(vec![]));
    let html = empty.surface().html(Region::Items);
    assert!(html.contains(&messages.empty_data), "{}", html);

    let mut list = loaded(builder(catalogue()).search(searchable(vec!["name"])));
    list.search("zzz");
    let html = list.surface().html(Region::Items);
    assert!(html.contains(&messages.no_results), "{}", html);
    assert!(!html.contains(&messages.empty_data));
    assert!(list.surface().fragments(Region::Pagination).is_empty());
}

#[test]
fn custom_messages_are_escaped() {
    let list = loaded(builder(vec![]).messages(Messages::default().with_empty_data("<none>")));
    assert_eq!(
        list.surface().html(Region::Items),
        r#"<div class="list-empty">&lt;none&gt;</div>"#
    );
}

#[test]
fn page_controls_follow_the_current_page() {
    let mut list = loaded(builder(numbered(25)).pagination(paged(10)));
    let control = |kind| EventSource::PageControl(kind);

    assert_eq!(list.surface().fragments(Region::Pagination).len(), 5);
    assert!(!list.bindings().is_attached(control(PageControlKind::Previous)));
    assert!(list.bindings().is_attached(control(PageControlKind::Next)));
    assert!(list.bindings().is_attached(control(PageControlKind::Number(3))));

    let id = list.id();
    list.update(Box::new(PageMsg {
        id,
        control: PageControlKind::Next,
    }));
    assert_eq!(list.page(), 2);

    list.update(Box::new(PageMsg {
        id,
        control: PageControlKind::Number(3),
    }));
    assert_eq!(list.page(), 3);
    assert!(!list.bindings().is_attached(control(PageControlKind::Next)));

    // Disabled control: not bound, so nothing happens.
    list.update(Box::new(PageMsg {
        id,
        control: PageControlKind::Next,
    }));
    assert_eq!(list.page(), 3);

    list.update(Box::new(PageMsg {
        id,
        control: PageControlKind::Previous,
    }));
    assert_eq!(list.page(), 2);
}

#[test]
fn disabled_pagination_shows_no_controls() {
    let list = loaded(builder(numbered(25)).pagination(PaginationOption::Toggle(false)));
    assert!(list.surface().fragments(Region::Pagination).is_empty());
    assert!(!list.bindings().iter().any(EventSource::is_page_control));
}

#[test]
fn three_quick_inputs_run_one_search() {
    let mut list = loaded(
        builder(catalogue())
            .search(searchable(vec!["name"]))
            .with_search_input(),
    );
    let id = list.id();

    for value in ["w", "wi", "wid"] {
        let cmd = list.update(Box::new(SearchInputMsg {
            id,
            value: value.to_string(),
        }));
        assert!(cmd.is_some());
    }
    assert_eq!(list.pending_query(), Some("wid"));

    list.update(Box::new(DebounceMsg::new(id, 1, "w")));
    list.update(Box::new(DebounceMsg::new(id, 2, "wi")));
    assert_eq!(list.query(), "");
    assert_eq!(list.filtered().len(), 4);

    list.update(Box::new(DebounceMsg::new(id, 3, "wid")));
    assert_eq!(list.query(), "wid");
    assert_eq!(names(&list), vec!["Widget"]);
    assert_eq!(list.pending_query(), None);
}

#[tokio::test]
async fn debounce_ticks_deliver_only_the_last_input() {
    let mut list = loaded(
        builder(catalogue())
            .search(SearchOption::Custom(SearchConfig {
                keys: Some(SearchKeys::from("name")),
                debounce_ms: Some(20),
                ..SearchConfig::default()
            }))
            .with_search_input(),
    );
    let id = list.id();

    let mut ticks = Vec::new();
    for value in ["w", "wi", "wid"] {
        ticks.extend(list.update(Box::new(SearchInputMsg {
            id,
            value: value.to_string(),
        })));
    }
    assert_eq!(ticks.len(), 3);

    let delivered: Vec<_> = futures::future::join_all(ticks)
        .await
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(delivered.len(), 3);

    let mut searches = 0;
    for msg in delivered {
        let before = list.query().to_string();
        list.update(msg);
        if list.query() != before {
            searches += 1;
        }
    }
    assert_eq!(searches, 1);
    assert_eq!(list.query(), "wid");
    assert_eq!(names(&list), vec!["Widget"]);
    assert_eq!(list.pending_query(), None);
}

#[test]
fn search_action_runs_at_once_and_cancels_pending_input() {
    let mut list = loaded(
        builder(catalogue())
            .search(searchable(vec!["name"]))
            .with_search_input()
            .with_search_action(),
    );
    let id = list.id();

    list.update(Box::new(SearchInputMsg {
        id,
        value: "gad".to_string(),
    }));
    list.update(Box::new(SearchSubmitMsg {
        id,
        value: "spr".to_string(),
    }));
    assert_eq!(names(&list), vec!["Sprocket"]);

    // The superseded tick arrives late and is ignored.
    list.update(Box::new(DebounceMsg::new(id, 1, "gad")));
    assert_eq!(names(&list), vec!["Sprocket"]);
}

#[test]
fn unbound_events_are_ignored() {
    let mut list = loaded(builder(catalogue()).search(SearchOption::Toggle(false)).with_search_input());
    let id = list.id();

    assert!(list.bindings().is_empty());
    let cmd = list.update(Box::new(SearchInputMsg {
        id,
        value: "w".to_string(),
    }));
    assert!(cmd.is_none());
    list.update(Box::new(SearchSubmitMsg {
        id,
        value: "w".to_string(),
    }));
    assert_eq!(list.filtered().len(), 4);
}

#[test]
fn messages_for_other_lists_are_ignored() {
    let mut list = loaded(
        builder(catalogue())
            .search(searchable(vec!["name"]))
            .with_search_action(),
    );
    list.update(Box::new(SearchSubmitMsg {
        id: list.id() + 1000,
        value: "widget".to_string(),
    }));
    assert_eq!(list.query(), "");
}

#[test]
fn destroy_detaches_everything_and_clears_the_surface() {
    let mut list = loaded(
        builder(numbered(25))
            .search(searchable(vec!["name"]))
            .pagination(paged(10))
            .with_search_input()
            .with_search_action(),
    );
    assert!(list.bindings().len() > 2);
    let id = list.id();
    list.update(Box::new(SearchInputMsg {
        id,
        value: "item 1".to_string(),
    }));

    list.destroy();
    assert!(list.is_destroyed());
    assert!(list.bindings().is_empty());
    assert!(list.surface().is_blank());
    assert_eq!(list.pending_query(), None);

    list.search("item");
    list.go_to_page(2);
    list.render();
    list.show_loading();
    assert!(list.update(Box::new(DebounceMsg::new(id, 1, "item 1"))).is_none());
    assert!(list.surface().is_blank());
    assert_eq!(list.query(), "");

    list.destroy();
    assert_eq!(list.lifecycle(), Lifecycle::Destroyed);
}

#[test]
fn loading_block_comes_and_goes() {
    let mut list = loaded(builder(numbered(3)));
    list.show_loading();
    assert!(list.surface().fragments(Region::Items).is_empty());
    assert!(list.surface().html(Region::Status).contains("list-loading"));

    list.hide_loading();
    assert!(list.surface().is_blank());

    // Only a loading block is removed by hide_loading.
    list.show_error("Oops", "details");
    list.hide_loading();
    assert!(list.surface().html(Region::Status).contains("list-error"));
}

#[test]
fn show_error_escapes_its_text() {
    let mut list = builder(vec![]).build().unwrap();
    list.show_error("<b>bad</b>", "a & b");
    assert_eq!(
        list.surface().html(Region::Status),
        r#"<div class="list-error"><strong>&lt;b&gt;bad&lt;/b&gt;</strong><p>a &amp; b</p></div>"#
    );
}

#[tokio::test]
async fn failed_loads_render_the_error_and_return_it() {
    let mut list = Model::builder()
        .container(MemorySurface::new())
        .data(DataSource::from("https://example.test/items.json"))
        .item_template(name_template)
        .fetcher(Arc::new(NoFetcher))
        .build()
        .unwrap();

    let err = list.load().await.unwrap_err();
    assert!(matches!(err, DataError::Transport(_)));
    assert_eq!(list.lifecycle(), Lifecycle::Failed);

    let status = list.surface().html(Region::Status);
    assert!(status.contains(&Messages::default().load_failed));
    assert!(!status.contains("list-loading"));
}

#[tokio::test]
async fn shape_errors_surface_through_load() {
    let mut list = Model::builder()
        .container(MemorySurface::new())
        .data(DataSource::Literal(serde_json::json!({ "items": [] })))
        .item_template(name_template)
        .build()
        .unwrap();

    let err = list.load().await.unwrap_err();
    assert_eq!(err.to_string(), "data must be an array");
    assert!(list.surface().html(Region::Status).contains("data must be an array"));
}

#[tokio::test]
async fn only_the_latest_load_command_is_applied() {
    let mut list = builder(numbered(4)).build().unwrap();

    let first = list.load_cmd().unwrap();
    let second = list.load_cmd().unwrap();
    assert_eq!(list.lifecycle(), Lifecycle::Loading);

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    list.update(first);
    assert_eq!(list.lifecycle(), Lifecycle::Loading);
    assert!(list.dataset().is_empty());

    list.update(second);
    assert_eq!(list.lifecycle(), Lifecycle::Ready);
    assert_eq!(list.dataset().len(), 4);
    assert_eq!(list.surface().fragments(Region::Items).len(), 4);
}

#[tokio::test]
async fn destroy_discards_in_flight_loads() {
    let mut list = builder(numbered(4)).build().unwrap();
    let cmd = list.load_cmd().unwrap();
    list.destroy();

    list.update(cmd.await.unwrap());
    assert!(list.dataset().is_empty());
    assert!(list.surface().is_blank());
}
