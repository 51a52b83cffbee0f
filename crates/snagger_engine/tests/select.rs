use snagger_engine::{select_provider, ProviderKind};

#[test]
fn recognized_video_hosts_route_to_video_provider() {
    for target in [
        "https://youtube.com/watch?v=abc",
        "https://www.youtube.com/watch?v=abc",
        "https://youtu.be/abc",
        "https://vimeo.com/12345",
        "https://www.dailymotion.com/video/x1",
    ] {
        assert_eq!(
            select_provider(target),
            ProviderKind::VideoHost,
            "target {target}"
        );
    }
}

#[test]
fn everything_else_routes_to_social_provider() {
    for target in [
        "https://social.example/post/1",
        "https://instagram.com/p/abc",
        "https://example.com/notyoutube.com/page",
        "catalog-item-42",
        "",
    ] {
        assert_eq!(
            select_provider(target),
            ProviderKind::SocialGeneric,
            "target {target}"
        );
    }
}

#[test]
fn lookalike_hosts_do_not_match() {
    // Suffix match requires a dot boundary; "notyoutube.com" is not youtube.
    assert_eq!(
        select_provider("https://notyoutube.com/watch?v=abc"),
        ProviderKind::SocialGeneric
    );
}

#[test]
fn non_url_targets_with_host_substring_still_match() {
    assert_eq!(
        select_provider("youtu.be/abc"),
        ProviderKind::VideoHost
    );
}

#[test]
fn selection_is_deterministic() {
    let target = "https://youtu.be/abc";
    let first = select_provider(target);
    for _ in 0..10 {
        assert_eq!(select_provider(target), first);
    }
}
