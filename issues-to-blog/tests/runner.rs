use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use issues_to_blog::{
    BlogConfig, BlogSettings, Comment, GitError, GitHubError, Issue, IssueSource, LocalRepository,
    PublishRequest, Publisher, RemoteRepository, Runner, RunnerError, TemplateRenderer, Viewer,
};
use tempfile::TempDir;

#[derive(Default)]
struct FakeSource {
    issues: Vec<Issue>,
    queries: Arc<Mutex<Vec<(String, String, String)>>>,
    viewer_calls: Arc<Mutex<usize>>,
}

impl IssueSource for FakeSource {
    async fn labeled_issues(
        &self,
        owner: &str,
        name: &str,
        label: &str,
    ) -> Result<Vec<Issue>, GitHubError> {
        self.queries.lock().unwrap().push((
            owner.to_string(),
            name.to_string(),
            label.to_string(),
        ));
        Ok(self.issues.clone())
    }

    async fn viewer(&self) -> Result<Viewer, GitHubError> {
        *self.viewer_calls.lock().unwrap() += 1;
        Ok(Viewer {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            email: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Published {
    paths: Vec<PathBuf>,
    message: String,
    author_name: String,
    author_email: String,
    token: String,
    branch: Option<String>,
}

#[derive(Default)]
struct FakePublisher {
    published: Arc<Mutex<Vec<Published>>>,
}

impl Publisher for FakePublisher {
    async fn publish(&self, request: &PublishRequest<'_>) -> Result<String, GitError> {
        self.published.lock().unwrap().push(Published {
            paths: request.paths.to_vec(),
            message: request.message.to_string(),
            author_name: request.author_name.to_string(),
            author_email: request.author_email.to_string(),
            token: request.token.to_string(),
            branch: request.branch.map(str::to_string),
        });
        Ok(request.branch.unwrap_or("main").to_string())
    }
}

struct FailingPublisher;

impl Publisher for FailingPublisher {
    async fn publish(&self, _request: &PublishRequest<'_>) -> Result<String, GitError> {
        Err(GitError::NothingToCommit)
    }
}

fn issue_42() -> Issue {
    Issue {
        number: 42,
        title: "Hello".to_string(),
        url: Some("https://github.com/owner/blog/issues/42".to_string()),
        created_at: Utc.with_ymd_and_hms(2020, 3, 5, 10, 0, 0).unwrap(),
        body: "intro ```date: x``` rest of post".to_string(),
        labels: vec!["post".to_string()],
        comments: vec![Comment {
            id: "c1".to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2020, 3, 6, 0, 0, 0).unwrap()),
            author_login: "alice".to_string(),
            avatar_url: "https://avatars.example/alice?s=160".to_string(),
            body_html: "line1\nline2".to_string(),
        }],
    }
}

fn issue_7() -> Issue {
    Issue {
        number: 7,
        title: "Older".to_string(),
        url: None,
        created_at: Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap(),
        body: "No fences here.".to_string(),
        labels: vec!["post".to_string(), "news".to_string()],
        comments: Vec::new(),
    }
}

fn repository(root: &Path) -> LocalRepository {
    LocalRepository {
        root: root.to_path_buf(),
        origin_url: "https://github.com/owner/blog.git".to_string(),
        remote: RemoteRepository {
            host: Some("github.com".to_string()),
            owner: "owner".to_string(),
            name: "blog".to_string(),
        },
    }
}

fn runner<P: Publisher>(
    root: &TempDir,
    config: BlogConfig,
    settings: BlogSettings,
    source: FakeSource,
    publisher: P,
) -> Runner<FakeSource, P> {
    Runner::with_parts(
        config,
        settings,
        repository(root.path()),
        source,
        publisher,
        TemplateRenderer::new().unwrap(),
    )
}

#[tokio::test]
async fn writes_posts_and_comments() {
    let root = TempDir::new().unwrap();
    let source = FakeSource {
        issues: vec![issue_42()],
        ..FakeSource::default()
    };
    let queries = source.queries.clone();
    let publisher = FakePublisher::default();
    let published = publisher.published.clone();
    let config = BlogConfig::new("token".to_string(), false);

    let summary = runner(&root, config, BlogSettings::default(), source, publisher)
        .run()
        .await
        .unwrap();

    assert_eq!(
        queries.lock().unwrap().as_slice(),
        &[(
            "owner".to_string(),
            "blog".to_string(),
            "post".to_string()
        )]
    );

    let post = fs::read_to_string(root.path().join("_posts/2020/2020-3-5-issue-42.markdown"))
        .unwrap();
    assert_eq!(
        post,
        "---\n\
         title: \"Hello\"\n\
         date: 2020-03-05 10:00:00Z\n\
         tags: [post]\n\
         new_comment_url: https://github.com/owner/blog/issues/42#new_comment_field\n\
         date: x\n\
         ---\n\
         \n\
         rest of post"
    );

    let comment = fs::read_to_string(root.path().join("_data/comments/issue-42/c1.yml")).unwrap();
    assert!(comment.contains("\n    line1\n    line2"));
    assert!(comment.starts_with("id: c1\ndate: 2020-03-06 00:00:00Z\nname: alice\n"));

    assert_eq!(summary.issues_fetched, 1);
    assert_eq!(summary.posts_written, 1);
    assert_eq!(summary.comments_written, 1);
    assert!(!summary.pushed());
    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rewrites_existing_files() {
    let root = TempDir::new().unwrap();
    let post_path = root.path().join("_posts/2020/2020-3-5-issue-42.markdown");
    fs::create_dir_all(post_path.parent().unwrap()).unwrap();
    fs::write(&post_path, "stale").unwrap();
    let source = FakeSource {
        issues: vec![issue_42()],
        ..FakeSource::default()
    };
    let config = BlogConfig::new("token".to_string(), false);

    runner(
        &root,
        config,
        BlogSettings::default(),
        source,
        FakePublisher::default(),
    )
    .run()
    .await
    .unwrap();

    let post = fs::read_to_string(&post_path).unwrap();
    assert!(post.ends_with("rest of post"));
    assert!(!post.contains("stale"));
}

#[tokio::test]
async fn pushes_written_files_in_issue_number_order() {
    let root = TempDir::new().unwrap();
    let source = FakeSource {
        issues: vec![issue_42(), issue_7()],
        ..FakeSource::default()
    };
    let viewer_calls = source.viewer_calls.clone();
    let publisher = FakePublisher::default();
    let published = publisher.published.clone();
    let config = BlogConfig::new("secret".to_string(), true);

    let summary = runner(&root, config, BlogSettings::default(), source, publisher)
        .run()
        .await
        .unwrap();

    assert_eq!(*viewer_calls.lock().unwrap(), 1);
    assert_eq!(
        published.lock().unwrap().as_slice(),
        &[Published {
            paths: vec![
                PathBuf::from("_posts/2021/2021-1-2-issue-7.markdown"),
                PathBuf::from("_posts/2020/2020-3-5-issue-42.markdown"),
                PathBuf::from("_data/comments/issue-42/c1.yml"),
            ],
            message: "update".to_string(),
            author_name: "The Octocat".to_string(),
            author_email: "octocat@users.noreply.github.com".to_string(),
            token: "secret".to_string(),
            branch: None,
        }]
    );
    assert_eq!(summary.pushed_branch.as_deref(), Some("main"));
    assert_eq!(summary.issues_fetched, 2);

    let older = fs::read_to_string(root.path().join("_posts/2021/2021-1-2-issue-7.markdown"))
        .unwrap();
    assert!(older.contains("tags: [post,news]\n\n---\n\nNo fences here."));
    assert!(!older.contains("new_comment_url"));
}

#[tokio::test]
async fn identity_overrides_skip_viewer_query() {
    let root = TempDir::new().unwrap();
    let source = FakeSource {
        issues: vec![issue_42()],
        ..FakeSource::default()
    };
    let viewer_calls = source.viewer_calls.clone();
    let publisher = FakePublisher::default();
    let published = publisher.published.clone();
    let config = BlogConfig::new("token".to_string(), true).with_viewer(
        Some("Blog Bot".to_string()),
        Some("bot@example.com".to_string()),
    );
    let settings = BlogSettings {
        commit_message: "Sync posts".to_string(),
        branch: Some("gh-pages".to_string()),
        ..BlogSettings::default()
    };

    let summary = runner(&root, config, settings, source, publisher)
        .run()
        .await
        .unwrap();

    assert_eq!(*viewer_calls.lock().unwrap(), 0);
    let published = published.lock().unwrap();
    assert_eq!(published[0].author_name, "Blog Bot");
    assert_eq!(published[0].author_email, "bot@example.com");
    assert_eq!(published[0].message, "Sync posts");
    assert_eq!(published[0].branch.as_deref(), Some("gh-pages"));
    assert_eq!(summary.pushed_branch.as_deref(), Some("gh-pages"));
}

#[tokio::test]
async fn partial_override_fills_in_from_viewer() {
    let root = TempDir::new().unwrap();
    let source = FakeSource {
        issues: vec![issue_7()],
        ..FakeSource::default()
    };
    let viewer_calls = source.viewer_calls.clone();
    let publisher = FakePublisher::default();
    let published = publisher.published.clone();
    let config = BlogConfig::new("token".to_string(), true)
        .with_viewer(None, Some("bot@example.com".to_string()));

    runner(&root, config, BlogSettings::default(), source, publisher)
        .run()
        .await
        .unwrap();

    assert_eq!(*viewer_calls.lock().unwrap(), 1);
    let published = published.lock().unwrap();
    assert_eq!(published[0].author_name, "The Octocat");
    assert_eq!(published[0].author_email, "bot@example.com");
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let root = TempDir::new().unwrap();
    let source = FakeSource {
        issues: vec![issue_42()],
        ..FakeSource::default()
    };
    let publisher = FakePublisher::default();
    let published = publisher.published.clone();
    let config = BlogConfig::new("token".to_string(), true).with_dry_run(true);

    let summary = runner(&root, config, BlogSettings::default(), source, publisher)
        .run()
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.files_written(), 2);
    assert!(!root.path().join("_posts").exists());
    assert!(!root.path().join("_data").exists());
    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn publish_failure_is_reported_as_git_error() {
    let root = TempDir::new().unwrap();
    let source = FakeSource {
        issues: vec![issue_42()],
        ..FakeSource::default()
    };
    let config = BlogConfig::new("token".to_string(), true)
        .with_viewer(Some("a".to_string()), Some("a@example.com".to_string()));

    let result = runner(
        &root,
        config,
        BlogSettings::default(),
        source,
        FailingPublisher,
    )
    .run()
    .await;

    match result {
        Err(error @ RunnerError::Git(GitError::NothingToCommit)) => {
            assert_eq!(error.exit_code(), 5);
        }
        other => panic!("expected git error, got {other:?}"),
    }
}
