//! The HTML page served at `/`.

use todo_core::{Stats, Todo};

pub fn render_index(todos: &[Todo]) -> String {
    let stats = Stats::from_todos(todos);
    let items: String = todos.iter().map(render_item).collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Todo App</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
li.completed span.title {{ text-decoration: line-through; color: #888; }}
small {{ color: #666; }}
</style>
</head>
<body>
<h1>Todo App</h1>
<p>{completed} of {total} done, {pending} pending</p>
<ul id="todos">
{items}</ul>
</body>
</html>
"#,
        completed = stats.completed,
        total = stats.total,
        pending = stats.pending,
    )
}

fn render_item(todo: &Todo) -> String {
    let (class, mark) = if todo.completed {
        ("completed", "&#x2611;")
    } else {
        ("pending", "&#x2610;")
    };
    format!(
        "<li class=\"{class}\" data-id=\"{id}\">{mark} <span class=\"title\">{title}</span> <small>{created}</small></li>\n",
        id = todo.id,
        title = escape_html(&todo.title),
        created = todo.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn lists_every_todo() {
        let todos = vec![
            Todo {
                id: 1,
                title: "<script>".to_string(),
                completed: true,
                created_at: Utc::now(),
            },
            Todo {
                id: 2,
                title: "Write docs".to_string(),
                completed: false,
                created_at: Utc::now(),
            },
        ];
        let html = render_index(&todos);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Write docs"));
        assert!(html.contains("1 of 2 done, 1 pending"));
        assert_eq!(html.matches("<li ").count(), 2);
    }
}
