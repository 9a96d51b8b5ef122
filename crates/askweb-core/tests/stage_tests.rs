use askweb_core::Stage;

#[test]
fn test_stage_progression() {
    assert_eq!(Stage::GetLinks.next(), Some(Stage::ScrapeWebData));
    assert_eq!(Stage::ScrapeWebData.next(), Some(Stage::GenerateAnswer));
    assert_eq!(Stage::GenerateAnswer.next(), Some(Stage::VerifyCitations));
    assert_eq!(Stage::VerifyCitations.next(), Some(Stage::Complete));
    assert_eq!(Stage::Complete.next(), None);
}

#[test]
fn test_can_advance() {
    assert!(Stage::GetLinks.can_advance());
    assert!(Stage::VerifyCitations.can_advance());
    assert!(!Stage::Complete.can_advance());
}

#[test]
fn test_default_stage_is_get_links() {
    assert_eq!(Stage::default(), Stage::GetLinks);
}
