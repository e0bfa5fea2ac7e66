//! Page templates, compiled into the binary and parsed once at startup.

use std::sync::Arc;
use tera::{Context, Tera};

use crate::error::{TodoError, TodoResult};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("macros.html", include_str!("../../templates/macros.html")),
    ("account/login.html", include_str!("../../templates/account/login.html")),
    ("account/register.html", include_str!("../../templates/account/register.html")),
    (
        "account/access_denied.html",
        include_str!("../../templates/account/access_denied.html"),
    ),
    ("todolist/index.html", include_str!("../../templates/todolist/index.html")),
    ("todolist/details.html", include_str!("../../templates/todolist/details.html")),
    ("todolist/form.html", include_str!("../../templates/todolist/form.html")),
    ("todolist/delete.html", include_str!("../../templates/todolist/delete.html")),
    ("task/details.html", include_str!("../../templates/task/details.html")),
    ("task/form.html", include_str!("../../templates/task/form.html")),
    ("task/delete.html", include_str!("../../templates/task/delete.html")),
    ("task/comments.html", include_str!("../../templates/task/comments.html")),
    ("task/comment_edit.html", include_str!("../../templates/task/comment_edit.html")),
    ("assigned/index.html", include_str!("../../templates/assigned/index.html")),
    ("search/index.html", include_str!("../../templates/search/index.html")),
    ("tags/index.html", include_str!("../../templates/tags/index.html")),
    ("tags/tasks.html", include_str!("../../templates/tags/tasks.html")),
];

#[derive(Clone, Debug)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    pub fn load() -> TodoResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(|e| TodoError::Configuration(format!("Failed to parse templates: {e:?}")))?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tera.get_template_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        let templates = Templates::load().unwrap();
        assert_eq!(templates.names().count(), TEMPLATES.len());
    }

    #[test]
    fn test_content_is_escaped() {
        let templates = Templates::load().unwrap();
        let mut context = Context::new();
        context.insert(
            "flash",
            &serde_json::json!({"kind": "error", "message": "<b>bold</b>"}),
        );
        context.insert("current_user", &None::<()>);
        context.insert("csrf_field", "_csrf");
        context.insert("csrf_token", "token");
        let html = templates.render("account/access_denied.html", &context).unwrap();
        assert!(html.contains("Access denied"));
        assert!(html.contains("&lt;b&gt;bold&lt;&#x2F;b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }
}
