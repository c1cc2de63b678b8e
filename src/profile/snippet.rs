//! Client Configuration Snippet
//!
//! Read-only agent configuration for the selected client language,
//! derived from the token and the user's defaults.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::UserProfileStoreFields;
use crate::store::UserStateStoreFields;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClientLanguage {
    #[default]
    Java,
    TestNg,
    Ruby,
    Soap,
    DotNet,
}

impl ClientLanguage {
    pub const ALL: [ClientLanguage; 5] = [
        ClientLanguage::Java,
        ClientLanguage::TestNg,
        ClientLanguage::Ruby,
        ClientLanguage::Soap,
        ClientLanguage::DotNet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClientLanguage::Java => "Java",
            ClientLanguage::TestNg => "TestNG",
            ClientLanguage::Ruby => "Ruby",
            ClientLanguage::Soap => "SoapUI",
            ClientLanguage::DotNet => ".NET",
        }
    }

    /// TestNG agents need the keystore next to the properties file
    pub fn shows_certificate(self) -> bool {
        self == ClientLanguage::TestNg
    }
}

/// Values substituted into a snippet
#[derive(Debug, Clone, Copy)]
pub struct SnippetInput<'a> {
    pub token: Option<&'a str>,
    /// Page origin, e.g. `https://rp.example.com`
    pub origin: &'a str,
    /// Origin plus API base
    pub api_endpoint: &'a str,
    pub login: &'a str,
    pub project: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnippetSection {
    pub title: &'static str,
    pub lines: Vec<String>,
}

fn section(title: &'static str, lines: Vec<String>) -> SnippetSection {
    SnippetSection { title, lines }
}

pub fn build_snippet(language: ClientLanguage, input: &SnippetInput<'_>) -> Vec<SnippetSection> {
    let token = input.token.unwrap_or_default();
    let launch = format!("{}_TEST_EXAMPLE", input.login);

    match language {
        ClientLanguage::Ruby => vec![section(
            "Configuration for Ruby clients (report_portal.yml)",
            vec![
                format!("password: {}", token),
                format!("endpoint: {}", input.api_endpoint),
                format!("project: {}", input.project),
                format!("launch: {}", launch),
                "tags:  [tag1, tag2]".to_string(),
            ],
        )],
        ClientLanguage::Soap => vec![section(
            "Configuration for SoapUI (project properties)",
            vec![
                format!("rp.uuid = {}", token),
                format!("rp.endpoint = {}", input.origin),
                format!("rp.launch = {}", launch),
                format!("rp.project = {}", input.project),
                "rp.tags = TAG1;TAG2".to_string(),
            ],
        )],
        ClientLanguage::DotNet => vec![section(
            "Configuration for .NET clients is described in the agent documentation",
            Vec::new(),
        )],
        ClientLanguage::Java | ClientLanguage::TestNg => vec![
            section("Configuration for Java clients (reportportal.properties)", Vec::new()),
            section(
                "REQUIRED:",
                vec![
                    format!("rp.endpoint = {}", input.origin),
                    format!("rp.uuid = {}", token),
                    format!("rp.launch = {}", launch),
                    format!("rp.project = {}", input.project),
                    "rp.keystore.resource = reportportal-client-v2.jks".to_string(),
                    "rp.keystore.password = reportportal".to_string(),
                ],
            ),
            section(
                "NOT REQUIRED:",
                vec![
                    "rp.enable = true".to_string(),
                    "rp.tags = TAG1;TAG2".to_string(),
                    "rp.convertimage = true".to_string(),
                    "rp.mode = DEFAULT".to_string(),
                    "rp.skipped.issue = true".to_string(),
                    "rp.batch.size.logs = 20".to_string(),
                ],
            ),
        ],
    }
}

#[component]
pub fn ConfigSnippet() -> impl IntoView {
    let ctx = use_app_context();
    let user = ctx.user;
    let (language, set_language) = signal(ClientLanguage::default());

    // Recomputed on tab, token or profile change
    let sections = Memo::new(move |_| {
        let token = user.api_token().get();
        let profile = user.profile().get();
        let lang = language.get();
        ctx.with_config(|config| {
            let endpoint = config.public_api_endpoint();
            let input = SnippetInput {
                token: token.as_deref(),
                origin: &config.origin,
                api_endpoint: &endpoint,
                login: &profile.login,
                project: profile.project_or_default(),
            };
            build_snippet(lang, &input)
        })
    });

    let certificate_url = ctx.with_config(|c| c.certificate_url.clone());

    view! {
        <div class="config-snippet">
            <ul class="config-tabs">
                {ClientLanguage::ALL.iter().map(|&lang| {
                    view! {
                        <li class:active=move || language.get() == lang>
                            <a
                                href="#"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    set_language.set(lang);
                                }
                            >
                                {lang.label()}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>

            <div class="config-editor">
                {move || sections.get().into_iter().map(|s| {
                    view! {
                        <h1>{s.title}</h1>
                        <div class="options">
                            {s.lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()}
                        </div>
                    }
                }).collect_view()}
            </div>

            <Show when=move || language.get().shows_certificate()>
                <a class="certificate" href=certificate_url.clone() download="">
                    "Download certificate"
                </a>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(token: Option<&str>) -> SnippetInput<'_> {
        SnippetInput {
            token,
            origin: "https://rp.example.com",
            api_endpoint: "https://rp.example.com/api/v1",
            login: "jdoe",
            project: "jdoe_personal",
        }
    }

    fn lines(sections: &[SnippetSection]) -> Vec<String> {
        sections.iter().flat_map(|s| s.lines.clone()).collect()
    }

    #[test]
    fn test_ruby_snippet() {
        let snippet = build_snippet(ClientLanguage::Ruby, &input(Some("tok-1")));
        assert_eq!(
            lines(&snippet),
            vec![
                "password: tok-1",
                "endpoint: https://rp.example.com/api/v1",
                "project: jdoe_personal",
                "launch: jdoe_TEST_EXAMPLE",
                "tags:  [tag1, tag2]",
            ]
        );
    }

    #[test]
    fn test_soap_snippet() {
        let all = lines(&build_snippet(ClientLanguage::Soap, &input(Some("tok-1"))));
        assert_eq!(all[0], "rp.uuid = tok-1");
        assert_eq!(all[1], "rp.endpoint = https://rp.example.com");
        assert_eq!(all[4], "rp.tags = TAG1;TAG2");
    }

    #[test]
    fn test_dotnet_is_title_only() {
        let snippet = build_snippet(ClientLanguage::DotNet, &input(Some("tok-1")));
        assert_eq!(snippet.len(), 1);
        assert!(snippet[0].lines.is_empty());
    }

    #[test]
    fn test_default_has_required_and_optional() {
        let snippet = build_snippet(ClientLanguage::Java, &input(Some("tok-1")));
        let titles: Vec<_> = snippet.iter().map(|s| s.title).collect();
        assert_eq!(&titles[1..], &["REQUIRED:", "NOT REQUIRED:"]);
        assert!(snippet[1].lines.contains(&"rp.uuid = tok-1".to_string()));
        assert!(snippet[2].lines.contains(&"rp.batch.size.logs = 20".to_string()));
    }

    #[test]
    fn test_testng_matches_default_and_shows_certificate() {
        let java = build_snippet(ClientLanguage::Java, &input(Some("t")));
        let testng = build_snippet(ClientLanguage::TestNg, &input(Some("t")));
        assert_eq!(java, testng);
        assert!(ClientLanguage::TestNg.shows_certificate());
        assert!(!ClientLanguage::Java.shows_certificate());
    }

    #[test]
    fn test_snippet_follows_token() {
        let before = build_snippet(ClientLanguage::Soap, &input(Some("old")));
        let after = build_snippet(ClientLanguage::Soap, &input(Some("new")));
        assert_ne!(before, after);
        assert_eq!(lines(&after)[0], "rp.uuid = new");
    }

    #[test]
    fn test_missing_token_renders_empty() {
        let snippet = build_snippet(ClientLanguage::Ruby, &input(None));
        assert_eq!(snippet[0].lines[0], "password: ");
    }
}
