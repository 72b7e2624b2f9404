use super::*;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

fn records(values: serde_json::Value) -> Vec<Record> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

const NAME_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new("name", "Name")];

const SCORE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("name", "Name"),
    FieldDescriptor::new("score", "Score"),
];

fn names(view: &TableView) -> Vec<String> {
    view.rows.iter().map(|r| r.cells[0].clone()).collect()
}

fn scores(records: &[Record], view: &TableView) -> Vec<i64> {
    view.rows
        .iter()
        .map(|r| records[r.index]["score"].as_i64().unwrap())
        .collect()
}

// =========================================================
// 过滤测试
// =========================================================

#[test]
fn test_filter_is_case_insensitive_substring() {
    let data = records(json!([{"name": "Amit"}, {"name": "Sam"}]));
    let mut state = TableState::new(Paging::Client, 10);

    state.set_filter("am");
    assert_eq!(names(&render(&data, NAME_FIELDS, &state)), vec!["Amit", "Sam"]);

    state.set_filter("AM");
    assert_eq!(render(&data, NAME_FIELDS, &state).rows.len(), 2);

    state.set_filter("zzz");
    assert!(render(&data, NAME_FIELDS, &state).rows.is_empty());
}

#[test]
fn test_filter_only_looks_at_visible_cells() {
    let data = records(json!([{"name": "Amit", "password": "secret"}]));
    let mut state = TableState::new(Paging::Client, 10);
    state.set_filter("secret");
    assert!(render(&data, NAME_FIELDS, &state).rows.is_empty());
}

#[test]
fn test_filter_matches_numbers_by_text() {
    let data = records(json!([{"name": "A", "score": 42}, {"name": "B", "score": 7}]));
    let mut state = TableState::new(Paging::Client, 10);
    state.set_filter("4");
    assert_eq!(names(&render(&data, SCORE_FIELDS, &state)), vec!["A"]);
}

// =========================================================
// 排序测试
// =========================================================

#[test]
fn test_numeric_sort_both_directions() {
    let data = records(json!([
        {"name": "x", "score": 30},
        {"name": "y", "score": 10},
        {"name": "z", "score": 20}
    ]));
    let mut state = TableState::new(Paging::Client, 10);

    state.toggle_sort("score");
    assert_eq!(scores(&data, &render(&data, SCORE_FIELDS, &state)), vec![10, 20, 30]);

    state.toggle_sort("score");
    assert_eq!(scores(&data, &render(&data, SCORE_FIELDS, &state)), vec![30, 20, 10]);

    state.toggle_sort("score");
    assert_eq!(state.sort(), None);
    assert_eq!(scores(&data, &render(&data, SCORE_FIELDS, &state)), vec![30, 10, 20]);
}

#[test]
fn test_numeric_sort_is_not_lexicographic() {
    let data = records(json!([{"name": "a", "score": 100}, {"name": "b", "score": 9}]));
    let mut state = TableState::new(Paging::Client, 10);
    state.toggle_sort("score");
    assert_eq!(scores(&data, &render(&data, SCORE_FIELDS, &state)), vec![9, 100]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let data = records(json!([
        {"name": "first", "score": 1},
        {"name": "second", "score": 0},
        {"name": "third", "score": 1},
        {"name": "fourth", "score": 0}
    ]));
    let mut state = TableState::new(Paging::Client, 10);

    state.toggle_sort("score");
    assert_eq!(
        names(&render(&data, SCORE_FIELDS, &state)),
        vec!["second", "fourth", "first", "third"]
    );

    state.toggle_sort("score");
    assert_eq!(
        names(&render(&data, SCORE_FIELDS, &state)),
        vec!["first", "third", "second", "fourth"]
    );
}

#[test]
fn test_switching_column_resets_to_ascending() {
    let mut state = TableState::new(Paging::Server, 10);
    state.toggle_sort("score");
    state.toggle_sort("score");
    state.toggle_sort("name");
    assert_eq!(
        state.sort(),
        Some(SortSpec {
            key: "name",
            direction: SortDirection::Ascending
        })
    );
}

#[test]
fn test_missing_values_sort_first() {
    let data = records(json!([{"name": "b"}, {"name": null}, {}]));
    let mut state = TableState::new(Paging::Client, 10);
    state.toggle_sort("name");
    let view = render(&data, NAME_FIELDS, &state);
    assert_eq!(names(&view), vec!["", "", "b"]);
    // null 与缺失视为相等，保持原始顺序
    assert_eq!(view.rows[0].index, 1);
    assert_eq!(view.rows[1].index, 2);
}

#[test]
fn test_filter_then_sort_compose() {
    let data = records(json!([
        {"name": "Sam", "score": 3},
        {"name": "Bob", "score": 1},
        {"name": "Samir", "score": 2}
    ]));
    let mut state = TableState::new(Paging::Client, 10);
    state.set_filter("sam");
    state.toggle_sort("score");
    assert_eq!(names(&render(&data, SCORE_FIELDS, &state)), vec!["Samir", "Sam"]);
}

#[test]
fn test_render_is_deterministic() {
    let data = records(json!([
        {"name": "c", "score": 2},
        {"name": "a", "score": 2},
        {"name": "b", "score": 1}
    ]));
    let mut state = TableState::new(Paging::Client, 2);
    state.toggle_sort("score");
    state.set_filter("");
    let first = render(&data, SCORE_FIELDS, &state);
    let second = render(&data, SCORE_FIELDS, &state);
    assert_eq!(first, second);
}

// =========================================================
// 分页测试
// =========================================================

#[test]
fn test_client_paging_slices_pages() {
    let data = records(json!([
        {"name": "1"}, {"name": "2"}, {"name": "3"}, {"name": "4"}, {"name": "5"}
    ]));
    let mut state = TableState::new(Paging::Client, 2);

    let view = render(&data, NAME_FIELDS, &state);
    assert_eq!(names(&view), vec!["1", "2"]);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.page_label(), "Page 1 of 3");
    assert_eq!(view.prev_page(), None);

    assert!(state.set_page(view.next_page().unwrap(), view.total_pages));
    assert!(state.set_page(render(&data, NAME_FIELDS, &state).next_page().unwrap(), 3));
    let view = render(&data, NAME_FIELDS, &state);
    assert_eq!(names(&view), vec!["5"]);
    assert_eq!(view.next_page(), None);
}

#[test]
fn test_filter_change_returns_to_first_page() {
    let data = records(json!([{"name": "a"}, {"name": "b"}, {"name": "c"}]));
    let mut state = TableState::new(Paging::Client, 1);
    assert!(state.set_page(2, 3));
    state.set_filter("b");
    let view = render(&data, NAME_FIELDS, &state);
    assert_eq!(view.page, 0);
    assert_eq!(names(&view), vec!["b"]);
}

#[test]
fn test_client_page_outside_range_is_ignored() {
    let mut state = TableState::new(Paging::Client, 1);
    assert!(state.set_page(1, 2));
    assert!(!state.set_page(2, 2));
    assert!(!state.set_page(99, 2));
    assert!(!state.set_page(0, 0));
    assert_eq!(state.page(), 1);
}

#[test]
fn test_client_page_is_clamped_when_rows_shrink() {
    let mut data = records(json!([{"name": "a"}, {"name": "b"}, {"name": "c"}]));
    let mut state = TableState::new(Paging::Client, 1);
    assert!(state.set_page(2, 3));

    // 重新加载后只剩两行：显示最后一页
    data.pop();
    let view = render(&data, NAME_FIELDS, &state);
    assert_eq!(view.page, 1);
    assert_eq!(names(&view), vec!["b"]);
}

#[test]
fn test_server_pager_boundaries_are_noops() {
    let mut state = TableState::new(Paging::Server, 10);
    state.apply_server_page(0, 3);
    let view = render(&[], NAME_FIELDS, &state);
    assert_eq!(view.prev_page(), None);
    assert_eq!(view.next_page(), Some(1));

    state.apply_server_page(2, 3);
    let view = render(&[], NAME_FIELDS, &state);
    assert_eq!(view.next_page(), None);
    assert_eq!(view.prev_page(), Some(1));
    assert_eq!(view.page_label(), "Page 3 of 3");
}

#[test]
fn test_server_page_stays_in_range() {
    let mut state = TableState::new(Paging::Server, 10);
    state.apply_server_page(7, 3);
    assert_eq!(state.page(), 2);

    state.apply_server_page(4, 0);
    assert_eq!(state.page(), 0);
}

#[test]
fn test_empty_table_has_no_pages() {
    let state = TableState::new(Paging::Client, 10);
    let view = render(&[], NAME_FIELDS, &state);
    assert_eq!(view.total_pages, 0);
    assert_eq!(view.next_page(), None);
    assert_eq!(view.prev_page(), None);
    assert_eq!(view.page_label(), "Page 0 of 0");
}
