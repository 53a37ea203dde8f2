//! End-to-end rendering tests

use pretty_assertions::assert_eq;
use tagsmith::{Args, Attributes, Environment, Locals, Proc, RenderError, Template, Value};

fn render(env: &Environment, template: &Template) -> String {
    template.render_in(env, Locals::new()).expect("Should render")
}

#[test]
fn test_html5_document() {
    let env = Environment::new();
    let page = Template::new(|r| {
        r.html5(|r| {
            r.call(
                "body",
                Args::with_block(|r| {
                    r.call("p", "hi")?;
                    Ok(())
                }),
            )?;
            Ok(())
        })
    });
    assert_eq!(
        render(&env, &page),
        "<!DOCTYPE html><html><body><p>hi</p></body></html>"
    );
}

#[test]
fn test_greeting_component() {
    let env = Environment::new();
    let greeting = Template::with_locals([("name", "stranger")], |r| {
        let name = r.call("name", ())?;
        r.call("p", format!("Hello, {}", name))?;
        Ok(())
    });
    env.register_component("Greeting", greeting).unwrap();

    let with_name = Template::new(|r| {
        r.call("Greeting", [("name", "Sam")])?;
        Ok(())
    });
    let without = Template::new(|r| {
        r.call("Greeting", ())?;
        Ok(())
    });

    assert_eq!(render(&env, &with_name), "<p>Hello, Sam</p>");
    assert_eq!(render(&env, &without), "<p>Hello, stranger</p>");
}

#[test]
fn test_nested_template_lands_in_same_buffer() {
    let env = Environment::new();
    let b = Template::new(|r| {
        // B sees everything A wrote so far: no separate sub-buffer
        let so_far = r.as_str().to_string();
        r.call("span", so_far)?;
        Ok(())
    });
    let a = Template::new(move |r| {
        r.call("p", b.clone())?;
        Ok(())
    });
    assert_eq!(render(&env, &a), "<p><span>&lt;p&gt;</span></p>");
}

#[test]
fn test_component_template_shares_scope_when_called_bare() {
    let env = Environment::new();
    env.register_component(
        "Crumb",
        Template::new(|r| {
            let page = r.call("page", ())?;
            r.call("li", page)?;
            Ok(())
        }),
    )
    .unwrap();

    let nav = Template::new(|r| {
        r.call(
            "ul",
            Args::with_block(|r| {
                r.call("Crumb", ())?;
                r.with_scope([("page", "About")], |r| r.call("Crumb", ()).map(drop))?;
                r.call("Crumb", [("page", "Contact")])?;
                Ok(())
            }),
        )?;
        Ok(())
    });

    let html = nav.render_in(&env, [("page", "Home")]).unwrap();
    assert_eq!(html, "<ul><li>Home</li><li>About</li><li>Contact</li></ul>");
}

#[test]
fn test_text_content_escaping() {
    let env = Environment::new();
    let nasty = r#"<script>alert("x" & 'y')</script>"#;
    let page = Template::new(move |r| {
        r.call("p", nasty)?;
        r.text(nasty);
        Ok(())
    });
    let html = render(&env, &page);
    let escaped = "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;";
    assert_eq!(html, format!("<p>{escaped}</p>{escaped}"));
    assert!(!html.contains("&amp;lt;"));
}

#[test]
fn test_emit_is_raw() {
    let env = Environment::new();
    let page = Template::new(|r| {
        r.emit("<b>raw</b>")?;
        r.emit(Value::Nil)?;
        r.emit(Value::Int(5))
    });
    assert_eq!(render(&env, &page), "<b>raw</b>5");
}

#[test]
fn test_self_closing_and_bare_attributes() {
    let env = Environment::new();
    let page = Template::new(|r| {
        r.call("img", [("src", "a.png")])?;
        r.call(
            "input",
            Attributes::from([
                ("type", Value::from("checkbox")),
                ("checked", Value::Bool(true)),
            ]),
        )?;
        Ok(())
    });
    assert_eq!(
        render(&env, &page),
        r#"<img src="a.png"/><input type="checkbox" checked/>"#
    );
}

#[test]
fn test_generic_attribute_values_are_not_escaped() {
    let env = Environment::new();
    let page = Template::new(|r| r.tag("div", [("title", "\"")]));
    assert_eq!(render(&env, &page), r#"<div title="""/>"#);
}

#[test]
fn test_proc_component_receives_arguments() {
    let env = Environment::new();
    env.register_component(
        "List",
        Proc::new(|r, args| {
            r.call(
                "ul",
                Args::with_block(|r| {
                    for item in &args.positional {
                        r.call("li", item.clone())?;
                    }
                    Ok(())
                }),
            )?;
            Ok(Value::Nil)
        }),
    )
    .unwrap();

    let page = Template::new(|r| {
        r.call("List", Args::new().arg("a").arg("b"))?;
        Ok(())
    });
    assert_eq!(render(&env, &page), "<ul><li>a</li><li>b</li></ul>");
}

#[test]
fn test_proc_component_returning_template() {
    let env = Environment::new();
    env.register_component(
        "Card",
        Proc::new(|_, args| {
            let title = args.text().cloned().unwrap_or_default();
            Ok(Value::Template(Template::new(move |r| {
                r.tag("h2", title.clone())
            })))
        }),
    )
    .unwrap();
    let page = Template::new(|r| {
        r.call("Card", "Stats")?;
        Ok(())
    });
    assert_eq!(render(&env, &page), "<h2>Stats</h2>");
}

#[test]
fn test_reserved_word_emits_literal_tag() {
    let env = Environment::new();
    let page = Template::new(|r| {
        r.call("text", "svg text")?;
        r.call("select", ())?;
        Ok(())
    });
    assert_eq!(render(&env, &page), "<text>svg text</text><select/>");
}

#[test]
fn test_failure_propagates_without_partial_output() {
    let env = Environment::new();
    env.register_component("Broken", Value::Float(1.5)).unwrap();
    let page = Template::new(|r| {
        r.call("p", "partial")?;
        r.call("Broken", ())?;
        Ok(())
    });
    let err = page.render_in(&env, Locals::new()).unwrap_err();
    assert!(err.to_string().starts_with("cannot render 1.5"));
    assert!(err.site().is_some());
}

#[test]
fn test_component_error_from_proc() {
    let env = Environment::new();
    env.register_component("Fails", Proc::new(|_, _| Err(RenderError::msg("no data"))))
        .unwrap();
    let page = Template::new(|r| r.call("Fails", ()).map(drop));
    let err = page.render_in(&env, Locals::new()).unwrap_err();
    assert_eq!(err.to_string(), "no data");
}

#[test]
fn test_page_snapshot() {
    let env = Environment::new();
    env.register_component("Footer", "<footer>&copy; 2026</footer>").unwrap();
    let layout = Template::with_locals([("title", "Untitled")], |r| {
        r.html5(|r| {
            r.call(
                "head",
                Args::with_block(|r| {
                    let title = r.call("title", ())?;
                    r.tag("title", title)
                }),
            )?;
            r.call(
                "body",
                Args::with_block(|r| {
                    r.call("a", Args::from("Home").attr("href", "/index.html"))?;
                    r.call("img", [("src", "logo 1.png"), ("alt", "Logo")])?;
                    r.call("Footer", ())?;
                    Ok(())
                }),
            )?;
            Ok(())
        })
    });

    let html = layout.render_in(&env, [("title", "Q&A")]).unwrap();
    insta::assert_snapshot!(html, @r#"<!DOCTYPE html><html><head><title>Q&amp;A</title></head><body><a href="/index.html">Home</a><img src="logo%201.png" alt="Logo"/><footer>&copy; 2026</footer></body></html>"#);
}
