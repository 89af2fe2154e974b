//! Demonstration page
//!
//! A small in-browser client for poking at the `/echo` endpoint by hand.

use axum::extract::Host;
use axum::response::Html;

const HOME_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>pulsewire</title>
<script>
window.addEventListener("load", function () {
    var wsUrl = {{WS_URL}};
    var output = document.getElementById("output");
    var input = document.getElementById("input");
    var ws = null;

    function print(message) {
        var line = document.createElement("div");
        line.textContent = message;
        output.appendChild(line);
        output.scrollTop = output.scrollHeight;
    }

    document.getElementById("open").onclick = function () {
        if (ws) {
            return false;
        }
        ws = new WebSocket(wsUrl);
        ws.onopen = function () { print("OPEN"); };
        ws.onclose = function (evt) {
            print("CLOSE " + evt.code);
            ws = null;
        };
        ws.onmessage = function (evt) { print("RESPONSE: " + evt.data); };
        ws.onerror = function () { print("ERROR"); };
        return false;
    };

    document.getElementById("send").onclick = function () {
        if (!ws) {
            return false;
        }
        print("SEND: " + input.value);
        ws.send(input.value);
        return false;
    };

    document.getElementById("close").onclick = function () {
        if (!ws) {
            return false;
        }
        ws.close();
        return false;
    };
});
</script>
</head>
<body>
<table>
<tr><td valign="top" width="50%">
<p>Click "Open" to connect, "Send" to send a message and "Close" to disconnect.
Sending <code>ping</code> returns a structured reply; anything else is echoed.</p>
<form>
<button id="open">Open</button>
<button id="close">Close</button>
<p><input id="input" type="text" value="ping">
<button id="send">Send</button>
</form>
</td><td valign="top" width="50%">
<div id="output" style="max-height: 70vh; overflow-y: scroll;"></div>
</td></tr>
</table>
</body>
</html>
"#;

/// Serve the page, pointing it at this server's `/echo` endpoint
pub async fn home(Host(host): Host) -> Html<String> {
    Html(render(&format!("ws://{}/echo", host)))
}

/// Render the page for the given WebSocket URL
pub fn render(ws_url: &str) -> String {
    HOME_TEMPLATE.replace("{{WS_URL}}", &script_string(ws_url))
}

/// Quote `value` as a JavaScript string literal safe to embed in a script tag
fn script_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_url() {
        let page = render("ws://localhost:8080/echo");
        assert!(page.contains(r#"var wsUrl = "ws://localhost:8080/echo";"#));
        assert!(!page.contains("{{WS_URL}}"));
    }

    #[test]
    fn test_url_cannot_close_script() {
        let page = render("ws://evil</script><script>alert(1)//");
        assert!(!page.contains("evil</script>"));
        assert!(page.contains(r"evil\u003c/script>"));
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(script_string(r#"a"b"#), r#""a\"b""#);
    }
}
