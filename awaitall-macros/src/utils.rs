use proc_macro::{TokenStream, TokenTree};

/// Splits a `TokenStream` into comma-separated arguments.
///
/// Only top-level commas separate arguments; commas inside delimited
/// groups stay part of their argument. Empty arguments (e.g. from a
/// trailing comma) are skipped.
pub(crate) fn split_args(input: TokenStream) -> Vec<Vec<TokenTree>> {
    let mut args = Vec::new();
    let mut current = Vec::new();

    for token in input {
        match &token {
            TokenTree::Punct(p) if p.as_char() == ',' => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(token),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Converts a slice of tokens back into Rust source.
///
/// Adjacent identifiers are separated by a space so they do not merge
/// (`move x` must not become `movex`).
pub(crate) fn tokens_to_string(tokens: &[TokenTree]) -> String {
    let mut out = String::new();
    let mut prev_was_ident = false;

    for token in tokens {
        let is_ident = matches!(token, TokenTree::Ident(_));

        if prev_was_ident && is_ident {
            out.push(' ');
        }

        out.push_str(&token.to_string());
        prev_was_ident = is_ident;
    }

    out
}

/// Reads `worker_threads = N` out of an attribute argument list.
///
/// Unknown keys are ignored.
pub(crate) fn parse_worker_threads(attr: &str) -> Option<usize> {
    attr.split(',').find_map(|part| {
        part.trim()
            .strip_prefix("worker_threads")
            .map(|value| value.trim_start().trim_start_matches('=').trim())
            .and_then(|value| value.parse::<usize>().ok())
    })
}

/// Renders a `compile_error!` invocation carrying `msg`.
pub(crate) fn compile_error(msg: &str) -> TokenStream {
    format!("compile_error!({msg:?});")
        .parse()
        .unwrap_or_default()
}
