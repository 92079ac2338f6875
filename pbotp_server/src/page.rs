//! HTML rendering for the token page.

use pbotp_core::Mode;

const TOKEN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width">

        <title>Login token for {node}</title>

        <style>
            html, body {
                height: 100%;
                margin: 0;
                padding: 0;
                border: 0;
            }

            body {
                background-color: #369;
            }

            .container {
                display: flex;
                align-items: center;
                justify-content: center;
                height: 100%;
            }

            .box {
                border-radius: 30px;
                background-color: #d7d7d7;
                text-align: center;

                padding: 40px;
            }

            .box .code {
                font-family: monospace;
                font-size: 40pt;
                word-spacing: -10pt;
                margin: 0px;
            }

            .box .phrase {
                font-size: 40pt;
                margin: 0px;
            }
        </style>
    </head>
    <body>
        <div class="container">
            <div class="box">
                <p>Login token for <b>{node}</b>:</p>
                <p class="{mode}">{code}</p>
            </div>
        </div>
    </body>
</html>
"#;

/// Renders the token page with `node` and `code` HTML-escaped and the
/// mode name as the CSS class of the token paragraph.
///
/// `node` is attacker-controlled (it comes straight from the request
/// path), so it is substituted last; text it contains never reaches a
/// later `replace` pass.
pub fn render_token_page(node: &str, code: &str, mode: Mode) -> String {
    TOKEN_PAGE
        .replace("{mode}", mode.as_str())
        .replace("{code}", &escape_html(code))
        .replace("{node}", &escape_html(node))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
