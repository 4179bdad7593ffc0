use async_trait::async_trait;
use edu_listing::loader::FixtureSource;
use edu_listing::{
    Course, CourseType, DataSource, ListingController, ListingError, LoadStatus, Result, School,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Data source whose responses are released by the test, one per call, in call
/// order.
#[derive(Default)]
struct ScriptedSource {
    schools: Mutex<VecDeque<oneshot::Receiver<Result<Vec<School>>>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn expect_school_fetch(&self) -> oneshot::Sender<Result<Vec<School>>> {
        let (tx, rx) = oneshot::channel();
        self.schools.lock().unwrap().push_back(rx);
        tx
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        Ok(Vec::new())
    }

    async fn fetch_schools(&self) -> Result<Vec<School>> {
        let next = self.schools.lock().unwrap().pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);
        match next {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(ListingError::Config("script dropped".into()))),
            None => Err(ListingError::Config("unexpected fetch".into())),
        }
    }
}

async fn wait_for_calls(source: &ScriptedSource, n: usize) {
    while source.calls() < n {
        tokio::task::yield_now().await;
    }
}

fn school(id: &str, name: &str) -> School {
    School::new(id, name, "")
}

#[tokio::test]
async fn stale_response_after_newer_fetch_is_discarded() {
    let source = Arc::new(ScriptedSource::default());
    let release_a = source.expect_school_fetch();
    let release_b = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    wait_for_calls(&source, 1).await;
    schools.mount().unwrap();
    wait_for_calls(&source, 2).await;

    release_b.send(Ok(vec![school("b", "From B")])).unwrap();
    assert_eq!(schools.next_update().await.unwrap(), Some(true));

    // A's task was aborted by the remount, so its result has nowhere to go.
    let _ = release_a.send(Ok(vec![school("a", "From A")]));
    assert_eq!(schools.next_update().await.unwrap(), None);

    let view = schools.view_state();
    assert_eq!(view.status, LoadStatus::Ready);
    assert_eq!(view.visible_items, vec![school("b", "From B")]);
}

#[tokio::test]
async fn early_stale_response_keeps_listing_loading() {
    let source = Arc::new(ScriptedSource::default());
    let release_a = source.expect_school_fetch();
    let release_b = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    wait_for_calls(&source, 1).await;
    schools.mount().unwrap();
    wait_for_calls(&source, 2).await;

    let _ = release_a.send(Ok(vec![school("a", "From A")]));
    tokio::task::yield_now().await;
    assert_eq!(schools.state().status, LoadStatus::Loading);
    assert!(schools.view_state().visible_items.is_empty());

    release_b.send(Ok(vec![school("b", "From B")])).unwrap();
    schools.settle().await.unwrap();
    assert_eq!(schools.view_state().visible_items.len(), 1);
    assert_eq!(schools.view_state().visible_items[0].id, "b");
}

#[tokio::test]
async fn remount_aborts_a_fetch_that_never_resolves() {
    let source = Arc::new(ScriptedSource::default());
    let mut hung = source.expect_school_fetch();
    let release = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    wait_for_calls(&source, 1).await;
    schools.mount().unwrap();
    release.send(Ok(vec![school("1", "Current")])).unwrap();

    tokio::time::timeout(Duration::from_secs(5), schools.settle())
        .await
        .expect("settle returned after the current fetch resolved")
        .unwrap();
    assert_eq!(schools.state().status, LoadStatus::Ready);
    assert_eq!(schools.view_state().visible_items[0].name, "Current");

    // The superseded task was dropped along with its pending request.
    tokio::time::timeout(Duration::from_secs(5), hung.closed())
        .await
        .expect("superseded fetch was aborted");
}

#[tokio::test]
async fn dispose_suppresses_late_results() {
    let source = Arc::new(ScriptedSource::default());
    let release = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    wait_for_calls(&source, 1).await;
    assert!(!schools.dispose().unwrap());

    // The fetch task was aborted, so the result may have nowhere to go.
    let _ = release.send(Ok(vec![school("1", "Too Late")]));

    assert_eq!(schools.next_update().await.unwrap(), None);
    assert_eq!(schools.state().status, LoadStatus::Loading);
    assert!(schools.state().collection.is_empty());

    // Further input is ignored once disposed.
    assert!(!schools.mount().unwrap());
    assert!(!schools.set_search("late").unwrap());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn failure_moves_to_failed_with_empty_collection() {
    let source = Arc::new(ScriptedSource::default());
    let release = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    release
        .send(Err(ListingError::Status {
            status: 503,
            url: "http://api/schools".into(),
        }))
        .unwrap();
    schools.settle().await.unwrap();

    let view = schools.view_state();
    assert_eq!(view.status, LoadStatus::Failed);
    assert!(view.visible_items.is_empty());
    assert!(!view.is_empty);
    assert_eq!(view.status_message().unwrap().message, "Couldn't load schools");
}

#[tokio::test]
async fn remount_after_failure_recovers() {
    let source = Arc::new(ScriptedSource::default());
    let fail = source.expect_school_fetch();
    let succeed = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    fail.send(Err(ListingError::Config("offline".into()))).unwrap();
    schools.settle().await.unwrap();
    assert_eq!(schools.state().status, LoadStatus::Failed);

    schools.mount().unwrap();
    assert_eq!(schools.state().status, LoadStatus::Loading);
    succeed.send(Ok(vec![school("1", "Back Online")])).unwrap();
    schools.settle().await.unwrap();

    assert_eq!(schools.state().status, LoadStatus::Ready);
    assert_eq!(schools.view_state().visible_items.len(), 1);
}

#[tokio::test]
async fn course_preview_keeps_first_six_in_order() {
    let courses: Vec<Course> = (1..=10)
        .map(|n| Course::new(n.to_string(), format!("Course {n}")).with_type(CourseType::Vilt))
        .collect();
    let source = Arc::new(FixtureSource::new(courses, Vec::new()));
    let mut preview = ListingController::course_preview(source, 6);

    preview.mount().unwrap();
    preview.settle().await.unwrap();

    let ids: Vec<String> = preview.view_state().visible_items.into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(preview.state().collection.len(), 6);
}

#[tokio::test]
async fn search_with_no_match_is_empty_state() {
    let source = Arc::new(FixtureSource::new(Vec::new(), vec![school("2", "Dubai Modern Academy")]));
    let mut schools = ListingController::school_directory(source);

    schools.mount().unwrap();
    schools.settle().await.unwrap();
    assert!(schools.set_search("zzz").unwrap());

    let view = schools.view_state();
    assert_eq!(view.status, LoadStatus::Ready);
    assert!(view.visible_items.is_empty());
    assert!(view.is_empty);
    assert_eq!(view.status_message().unwrap().message, "No schools found");

    assert!(schools.clear_filters().unwrap());
    assert!(!schools.view_state().is_empty);
}

#[tokio::test]
async fn search_matches_city_case_insensitively() {
    let mut schools = ListingController::school_directory(Arc::new(FixtureSource::demo()));
    schools.mount().unwrap();
    schools.settle().await.unwrap();

    schools.set_search("  JEDDAH ").unwrap();
    let names: Vec<String> = schools.view_state().visible_items.into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Jeddah Excellence School"]);

    schools.set_search("saudi").unwrap();
    assert!(schools.view_state().is_empty, "country is not a search field");

    schools.set_search("dubai").unwrap();
    assert_eq!(schools.view_state().visible_items[0].short_name, "DMA");
}

#[tokio::test]
async fn technology_category_matches_no_course_type() {
    let mut courses = ListingController::course_preview(Arc::new(FixtureSource::demo()), 6);
    courses.mount().unwrap();
    courses.settle().await.unwrap();

    courses.select_category("technology").unwrap();
    let view = courses.view_state();
    assert_eq!(view.status, LoadStatus::Ready);
    assert!(view.is_empty);

    courses.select_category("ILT").unwrap();
    assert!(courses
        .view_state()
        .visible_items
        .iter()
        .all(|c| c.course_type == Some(CourseType::Ilt)));
}

#[tokio::test]
async fn criteria_set_while_loading_apply_on_arrival() {
    let source = Arc::new(ScriptedSource::default());
    let release = source.expect_school_fetch();
    let mut schools = ListingController::school_directory(source.clone());

    schools.mount().unwrap();
    schools.set_search("riyadh").unwrap();
    release
        .send(Ok(vec![
            school("1", "Al Riyadh International School"),
            school("2", "Dubai Modern Academy"),
        ]))
        .unwrap();
    schools.settle().await.unwrap();

    let view = schools.view_state();
    assert_eq!(view.visible_items.len(), 1);
    assert_eq!(view.visible_items[0].id, "1");
}

#[tokio::test]
async fn unmounted_listing_has_nothing_to_settle() {
    let mut schools = ListingController::school_directory(Arc::new(FixtureSource::demo()));
    assert_eq!(schools.next_update().await.unwrap(), None);
    assert_eq!(schools.state().status, LoadStatus::Loading);
    assert!(!schools.view_state().is_empty);
}
