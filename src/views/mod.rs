//! Plain HTML bodies for the rendered pages. Markup is deliberately
//! minimal; handlers only decide what data goes in.

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - Secrets</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// Escape user-supplied text before it lands in markup.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn home() -> String {
    page(
        "Home",
        "<h1>Secrets</h1>\n<p>Don't keep your secrets, share them anonymously!</p>\n\
         <p><a href=\"/register\">Register</a> <a href=\"/login\">Login</a></p>",
    )
}

pub fn register() -> String {
    page(
        "Register",
        "<h1>Register</h1>\n\
         <form action=\"/register\" method=\"post\">\n\
         <label>Email <input type=\"email\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Register</button>\n</form>\n\
         <p><a href=\"/auth/google\">Sign up with Google</a></p>",
    )
}

pub fn login() -> String {
    page(
        "Login",
        "<h1>Login</h1>\n\
         <form action=\"/login\" method=\"post\">\n\
         <label>Email <input type=\"email\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Login</button>\n</form>\n\
         <p><a href=\"/auth/google\">Sign in with Google</a></p>",
    )
}

pub fn secrets(secret_texts: &[&str], authenticated: bool) -> String {
    let items = secret_texts
        .iter()
        .map(|text| format!("<p class=\"secret-text\">{}</p>", escape(text)))
        .collect::<Vec<_>>()
        .join("\n");

    let (button_href, button_label) = if authenticated {
        ("/logout", "Log Out")
    } else {
        ("/", "Home")
    };

    page(
        "Secrets",
        &format!(
            "<h1>You've Discovered My Secret!</h1>\n{items}\n\
             <p><a href=\"{button_href}\">{button_label}</a> \
             <a href=\"/submit\">Submit a Secret</a></p>"
        ),
    )
}

pub fn submit() -> String {
    page(
        "Submit",
        "<h1>Share a secret</h1>\n\
         <form action=\"/submit\" method=\"post\">\n\
         <input type=\"text\" name=\"secret\" placeholder=\"What's your secret?\" required>\n\
         <button type=\"submit\">Submit</button>\n</form>",
    )
}

pub fn about() -> String {
    page(
        "About",
        "<h1>About</h1>\n<p>A place to share what you never dared to say out loud.</p>",
    )
}

pub fn contact() -> String {
    page(
        "Contact",
        "<h1>Contact</h1>\n<p>Reach the team at team@secrets.example.</p>",
    )
}

pub fn error_page() -> String {
    page(
        "Error",
        "<h1>Something went wrong</h1>\n<p>Please try again later.</p>\n\
         <p><a href=\"/\">Home</a></p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape("<script>\"a & b\"</script>"),
            "&lt;script&gt;&quot;a &amp; b&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_secrets_button_label_follows_auth_state() {
        let signed_in = secrets(&["one"], true);
        assert!(signed_in.contains("Log Out"));
        assert!(!signed_in.contains(">Home<"));

        let anonymous = secrets(&["one"], false);
        assert!(anonymous.contains(">Home<"));
        assert!(!anonymous.contains("Log Out"));
    }

    #[test]
    fn test_secrets_escapes_user_text() {
        let body = secrets(&["<img src=x>"], false);
        assert!(body.contains("&lt;img src=x&gt;"));
        assert!(!body.contains("<img src=x>"));
    }
}
