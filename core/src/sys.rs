use std::path::PathBuf;

use crate::cms::{now_ms, Cms};
use crate::command::Command;
use crate::data::memory::MemoryStore;
use crate::data::repo::{LayoutRepo, PageRepo, SiteRepo};
use crate::error::CmsError;
use crate::response::Response;
use crate::types::config::CmsSettings;
use crate::types::layout::{LayoutChanges, LayoutDraft};
use crate::types::revision::RevisionField;
use crate::types::site::Page;


/// Central runtime. Dispatches commands against one store and remembers
/// whether anything was written so the caller knows to save.
pub struct Sys {
    cms: Cms<MemoryStore>,
    dirty: bool,
}


impl Sys {
    pub fn new(store: MemoryStore, settings: CmsSettings) -> Sys {
        Sys {
            cms: Cms::new(store, settings),
            dirty: false,
        }
    }

    pub fn cms(&self) -> &Cms<MemoryStore> {
        &self.cms
    }

    pub fn store(&self) -> &MemoryStore {
        self.cms.store()
    }

    /// True once a mutating command has succeeded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The single dispatch method.
    pub fn execute(&mut self, cmd: Command) -> Response {
        let mutating = cmd.is_mutating();
        let response = match cmd {
            Command::SiteCreate { identifier, label, hostname } => {
                self.cmd_site_create(identifier, label, hostname)
            }
            Command::SiteList => Response::json(&self.cms.store().sites()),
            Command::LayoutCreate {
                site,
                identifier,
                label,
                parent,
                position,
                content,
                css,
                js,
            } => {
                let draft = LayoutDraft {
                    site_id: Some(site),
                    parent_id: parent,
                    label: label.unwrap_or_default(),
                    identifier,
                    content: content.unwrap_or_default(),
                    css: css.unwrap_or_default(),
                    js: js.unwrap_or_default(),
                    position,
                };
                self.cmd_layout_create(draft)
            }
            Command::LayoutUpdate {
                id,
                label,
                identifier,
                parent,
                position,
                content,
                css,
                js,
            } => {
                let parent_id = match parent.as_deref().map(parse_parent).transpose() {
                    Ok(p) => p,
                    Err(message) => return Response::error(message),
                };
                let changes = LayoutChanges {
                    parent_id,
                    label,
                    identifier,
                    content,
                    css,
                    js,
                    position,
                };
                self.cmd_layout_update(id, changes)
            }
            Command::LayoutDestroy { id } => self.cmd_layout_destroy(id),
            Command::LayoutShow { id } => self.cmd_layout_show(id),
            Command::LayoutList { site } => match self.cms.layouts_for_site(site) {
                Ok(layouts) => Response::json(&layouts),
                Err(e) => error_response(e),
            },
            Command::LayoutTokens { id } => match self.cms.content_tokens(id) {
                Ok(tokens) => Response::json(&tokens),
                Err(e) => error_response(e),
            },
            Command::LayoutOptions { site, exclude, parents } => {
                self.cmd_layout_options(site, exclude, parents)
            }
            Command::LayoutApp { paths } => self.cmd_layout_app(paths),
            Command::LayoutRevisions { id, field } => self.cmd_layout_revisions(id, field),
            Command::LayoutRestore { id, revision } => {
                match self.cms.restore_revision(id, revision, now_ms()) {
                    Ok(layout) => Response::json(&layout),
                    Err(e) => error_response(e),
                }
            }
            Command::PageCreate { site, label, layout, fragments } => {
                let page = Page {
                    fragments,
                    ..Page::new(site, &label, layout)
                };
                match self.cms.create_page(page) {
                    Ok(page) => Response::json(&page),
                    Err(e) => error_response(e),
                }
            }
            Command::PageRender { id } => self.cmd_page_render(id),
            Command::Help { topic } => Response::ok(crate::help::help_text(topic.as_deref())),
        };
        if mutating && response.is_ok() {
            self.dirty = true;
        }
        response
    }

    // -----------------------------------------------------------------------
    // Sites
    // -----------------------------------------------------------------------

    fn cmd_site_create(
        &mut self,
        identifier: String,
        label: Option<String>,
        hostname: Option<String>,
    ) -> Response {
        let label = label.unwrap_or_default();
        let hostname = hostname.unwrap_or_default();
        match self.cms.create_site(&identifier, &label, &hostname) {
            Ok(site) => Response::json(&site),
            Err(e) => error_response(e),
        }
    }

    // -----------------------------------------------------------------------
    // Layouts
    // -----------------------------------------------------------------------

    fn cmd_layout_create(&mut self, draft: LayoutDraft) -> Response {
        match self.cms.create_layout(draft, now_ms()) {
            Ok(layout) => Response::json(&layout),
            Err(e) => error_response(e),
        }
    }

    fn cmd_layout_update(&mut self, id: u64, changes: LayoutChanges) -> Response {
        match self.cms.update_layout(id, changes, now_ms()) {
            Ok(layout) => Response::json(&layout),
            Err(e) => error_response(e),
        }
    }

    fn cmd_layout_destroy(&mut self, id: u64) -> Response {
        match self.cms.destroy_layout(id) {
            Ok(destroyed) => {
                let names: Vec<&str> = destroyed.iter().map(|l| l.identifier.as_str()).collect();
                Response::ok(format!("Destroyed {} layout(s): {}", names.len(), names.join(", ")))
            }
            Err(e) => error_response(e),
        }
    }

    fn cmd_layout_show(&self, id: u64) -> Response {
        match self.cms.layout(id) {
            Ok(layout) => {
                let value = serde_json::json!({
                    "layout": layout,
                    "cache_buster": layout.cache_buster(),
                    "children": self
                        .cms
                        .store()
                        .children(id)
                        .iter()
                        .map(|l| l.id)
                        .collect::<Vec<_>>(),
                });
                Response::json(&value)
            }
            Err(e) => error_response(e),
        }
    }

    fn cmd_layout_options(&self, site: u64, exclude: Option<u64>, parents: bool) -> Response {
        let options = if parents {
            self.cms.parent_options_for_select(site, exclude)
        } else {
            self.cms.options_for_select(site, exclude)
        };
        match options {
            Ok(options) => {
                let rows: Vec<serde_json::Value> = options
                    .into_iter()
                    .map(|(label, id)| serde_json::json!({ "label": label, "id": id }))
                    .collect();
                Response::json(&rows)
            }
            Err(e) => error_response(e),
        }
    }

    fn cmd_layout_app(&self, paths: Vec<String>) -> Response {
        let found = if paths.is_empty() {
            self.cms.app_layouts_for_select()
        } else {
            let roots: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
            crate::layout::app_layouts::app_layouts_for_select(&roots)
        };
        Response::json(&found)
    }

    fn cmd_layout_revisions(&self, id: u64, field: Option<String>) -> Response {
        let field = match field.as_deref().map(str::parse::<RevisionField>).transpose() {
            Ok(f) => f,
            Err(message) => return Response::error(message),
        };
        match self.cms.revisions(id) {
            Ok(revisions) => {
                let filtered: Vec<_> = revisions
                    .into_iter()
                    .filter(|r| field.map_or(true, |f| r.field == f))
                    .collect();
                Response::json(&filtered)
            }
            Err(e) => error_response(e),
        }
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    fn cmd_page_render(&mut self, id: u64) -> Response {
        let was_cached = self
            .cms
            .store()
            .page(id)
            .map(|p| p.content_cache.is_some())
            .unwrap_or(false);
        match self.cms.page_content(id) {
            Ok(content) => {
                if was_cached {
                    log::debug!("page {} served from cache", id);
                }
                Response::ok(content)
            }
            Err(e) => error_response(e),
        }
    }
}


/// `none` detaches; anything else must be a layout id.
fn parse_parent(raw: &str) -> Result<Option<u64>, String> {
    match raw {
        "none" | "root" | "" => Ok(None),
        other => other
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("invalid parent id: '{}'", other)),
    }
}


fn error_response(err: CmsError) -> Response {
    Response::error(err.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sys_with_site() -> (Sys, u64) {
        let mut sys = Sys::new(MemoryStore::new(), CmsSettings::default());
        let resp = sys.execute(Command::SiteCreate {
            identifier: "main".into(),
            label: None,
            hostname: Some("example.com".into()),
        });
        let site_id = json_output(resp)["id"].as_u64().unwrap();
        (sys, site_id)
    }

    fn json_output(resp: Response) -> serde_json::Value {
        match resp {
            Response::Ok { output } => serde_json::from_str(&output).unwrap(),
            Response::Error { message } => panic!("Unexpected error: {}", message),
        }
    }

    fn create_layout(sys: &mut Sys, site: u64, ident: &str, parent: Option<u64>, content: &str) -> u64 {
        let resp = sys.execute(Command::LayoutCreate {
            site,
            identifier: ident.into(),
            label: None,
            parent,
            position: None,
            content: Some(content.into()),
            css: None,
            js: None,
        });
        json_output(resp)["id"].as_u64().unwrap()
    }

    #[test]
    fn create_marks_dirty() {
        let (sys, _) = sys_with_site();
        assert!(sys.is_dirty());
    }

    #[test]
    fn read_only_command_stays_clean() {
        let mut sys = Sys::new(MemoryStore::new(), CmsSettings::default());
        let resp = sys.execute(Command::SiteList);
        assert_eq!(json_output(resp), serde_json::json!([]));
        assert!(!sys.is_dirty());
    }

    #[test]
    fn failed_mutation_stays_clean() {
        let mut sys = Sys::new(MemoryStore::new(), CmsSettings::default());
        let resp = sys.execute(Command::LayoutCreate {
            site: 1,
            identifier: "x".into(),
            label: None,
            parent: None,
            position: None,
            content: None,
            css: None,
            js: None,
        });
        match resp {
            Response::Error { message } => assert!(message.contains("site_id must exist")),
            Response::Ok { output } => panic!("Unexpected success: {}", output),
        }
        assert!(!sys.is_dirty());
    }

    #[test]
    fn tokens_merge_through_parent() {
        let (mut sys, site) = sys_with_site();
        let parent = create_layout(&mut sys, site, "base", None, "<html>{{cms:wysiwyg content}}</html>");
        let child = create_layout(&mut sys, site, "inner", Some(parent), "<p/>");
        let tokens = json_output(sys.execute(Command::LayoutTokens { id: child }));
        assert_eq!(tokens, serde_json::json!(["<html>", "<p/>", "</html>"]));
    }

    #[test]
    fn options_listing() {
        let (mut sys, site) = sys_with_site();
        let a = create_layout(&mut sys, site, "a", None, "");
        let b = create_layout(&mut sys, site, "b", Some(a), "");
        create_layout(&mut sys, site, "d", Some(b), "");
        let rows = json_output(sys.execute(Command::LayoutOptions {
            site,
            exclude: Some(b),
            parents: false,
        }));
        let labels: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["A", ". . . . D"]);

        let rows = json_output(sys.execute(Command::LayoutOptions {
            site,
            exclude: Some(b),
            parents: true,
        }));
        assert_eq!(rows.as_array().unwrap().len(), 1);
    }

    #[test]
    fn update_detaches_with_none() {
        let (mut sys, site) = sys_with_site();
        let a = create_layout(&mut sys, site, "a", None, "");
        let b = create_layout(&mut sys, site, "b", Some(a), "");
        let resp = sys.execute(Command::LayoutUpdate {
            id: b,
            label: None,
            identifier: None,
            parent: Some("none".into()),
            position: None,
            content: None,
            css: None,
            js: None,
        });
        assert!(json_output(resp).get("parent_id").is_none());
    }

    #[test]
    fn update_rejects_bad_parent() {
        let (mut sys, site) = sys_with_site();
        let a = create_layout(&mut sys, site, "a", None, "");
        let resp = sys.execute(Command::LayoutUpdate {
            id: a,
            label: None,
            identifier: None,
            parent: Some("abc".into()),
            position: None,
            content: None,
            css: None,
            js: None,
        });
        assert!(matches!(resp, Response::Error { .. }));
    }

    #[test]
    fn revisions_filter_by_field() {
        let (mut sys, site) = sys_with_site();
        let a = create_layout(&mut sys, site, "a", None, "v1");
        sys.execute(Command::LayoutUpdate {
            id: a,
            label: None,
            identifier: None,
            parent: None,
            position: None,
            content: Some("v2".into()),
            css: Some("body{}".into()),
            js: None,
        });
        let all = json_output(sys.execute(Command::LayoutRevisions { id: a, field: None }));
        assert_eq!(all.as_array().unwrap().len(), 2);
        let css = json_output(sys.execute(Command::LayoutRevisions {
            id: a,
            field: Some("css".into()),
        }));
        assert_eq!(css.as_array().unwrap().len(), 1);
        assert_eq!(css[0]["previous"], "");
        let bad = sys.execute(Command::LayoutRevisions {
            id: a,
            field: Some("html".into()),
        });
        assert!(!bad.is_ok());
    }

    #[test]
    fn page_render_and_destroy() {
        let (mut sys, site) = sys_with_site();
        let a = create_layout(&mut sys, site, "a", None, "<h1>{{cms:text title}}</h1>");
        let mut fragments = std::collections::BTreeMap::new();
        fragments.insert("title".to_string(), "Hi".to_string());
        let page = json_output(sys.execute(Command::PageCreate {
            site,
            label: "Home".into(),
            layout: Some(a),
            fragments,
        }))["id"]
            .as_u64()
            .unwrap();

        match sys.execute(Command::PageRender { id: page }) {
            Response::Ok { output } => assert_eq!(output, "<h1>Hi</h1>"),
            Response::Error { message } => panic!("Unexpected error: {}", message),
        }

        match sys.execute(Command::LayoutDestroy { id: a }) {
            Response::Ok { output } => assert!(output.contains("a")),
            Response::Error { message } => panic!("Unexpected error: {}", message),
        }
        match sys.execute(Command::PageRender { id: page }) {
            Response::Ok { output } => assert_eq!(output, ""),
            Response::Error { message } => panic!("Unexpected error: {}", message),
        }
    }

    #[test]
    fn show_includes_cache_buster_and_children() {
        let (mut sys, site) = sys_with_site();
        let a = create_layout(&mut sys, site, "a", None, "");
        let b = create_layout(&mut sys, site, "b", Some(a), "");
        let shown = json_output(sys.execute(Command::LayoutShow { id: a }));
        assert_eq!(shown["children"], serde_json::json!([b]));
        assert!(shown["cache_buster"].as_u64().is_some());
        assert_eq!(shown["layout"]["identifier"], "a");
    }

    #[test]
    fn help_returns_overview() {
        let mut sys = Sys::new(MemoryStore::new(), CmsSettings::default());
        match sys.execute(Command::Help { topic: None }) {
            Response::Ok { output } => assert!(output.contains("cms")),
            Response::Error { message } => panic!("Unexpected error: {}", message),
        }
    }
}
