//! Procedural macros for `awaitall`.
//!
//! - [`join!`](macro@join): join any number of task handles into a tuple,
//! - [`#[awaitall::test]`](macro@test): run an async test on a fresh runtime.

mod utils;

use proc_macro::{Delimiter, Group, TokenStream, TokenTree};

/// Joins task handles of any arity into a tuple of their values.
///
/// `join!(a, b, c)` must be used inside an async context. It waits until
/// every handle is terminal and evaluates to
/// `Result<(A, B, C), E>`: the values in argument order, or the failure of
/// the first failing handle in argument order. Arguments may be handles or
/// references to handles; all must share the error type `E`.
///
/// `join!()` evaluates to `Ok(())` without suspending.
///
/// Arguments are split on top-level commas, so an argument with a comma
/// outside any parentheses or brackets (a turbofish such as
/// `TaskHandle::<u8, ()>::succeeded(1)`) must be bound to a variable first.
#[proc_macro]
pub fn join(input: TokenStream) -> TokenStream {
    let args = utils::split_args(input);
    let count = args.len();

    if count == 0 {
        return "::core::result::Result::Ok(())".parse().unwrap_or_default();
    }

    let mut output = String::from("{\n");

    for (i, expr_tokens) in args.iter().enumerate() {
        let expr = utils::tokens_to_string(expr_tokens);
        output.push_str(&format!("let __awaitall_h{i} = {expr};\n"));
    }

    output.push_str("let __awaitall_wait = {\n");
    output.push_str(&format!(
        "let mut __awaitall_registry = ::awaitall::join::Registry::<()>::with_capacity({count});\n"
    ));
    for i in 0..count {
        output.push_str(&format!(
            "__awaitall_registry.push(::awaitall::join::Slot::Position({i}), &__awaitall_h{i});\n"
        ));
    }
    output.push_str("::awaitall::join::WaitAll::new(&__awaitall_registry)\n");
    output.push_str("};\n");
    output.push_str("__awaitall_wait.await;\n");

    output.push_str("'__awaitall_join: {\n");
    output.push_str("::core::result::Result::Ok((\n");
    for i in 0..count {
        output.push_str(&format!(
            "match __awaitall_h{i}.outcome() {{\n\
                ::core::result::Result::Ok(value) => value,\n\
                ::core::result::Result::Err(error) => break '__awaitall_join ::core::result::Result::Err(error),\n\
            }},\n"
        ));
    }
    output.push_str("))\n");
    output.push_str("}\n");
    output.push_str("}\n");

    output
        .parse::<TokenStream>()
        .unwrap_or_else(|err| utils::compile_error(&format!("join macro error: {err}")))
}

/// Turns an `async fn` into a `#[test]` that runs on a fresh runtime.
///
/// Accepts an optional `worker_threads = N`; by default the runtime uses
/// one worker per available CPU.
///
/// ```rust,ignore
/// #[awaitall::test(worker_threads = 1)]
/// async fn joins() {
///     let values = awaitall::join_sequence(Vec::<awaitall::TaskHandle<u8, ()>>::new()).await;
///     assert_eq!(values, Ok(vec![]));
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    let mut builder = String::from("::awaitall::RuntimeBuilder::new()");
    if let Some(n) = utils::parse_worker_threads(&attr.to_string()) {
        builder.push_str(&format!(".worker_threads({n})"));
    }
    builder.push_str(".build()");

    if let Some(pos) = tokens
        .iter()
        .position(|t| matches!(t, TokenTree::Ident(id) if id.to_string() == "async"))
    {
        tokens.remove(pos);
    }

    let Some(pos) = tokens
        .iter()
        .rposition(|t| matches!(t, TokenTree::Group(g) if g.delimiter() == Delimiter::Brace))
    else {
        return utils::compile_error("#[awaitall::test] expects a function with a body");
    };

    let body = match &tokens[pos] {
        TokenTree::Group(g) => g.stream().to_string(),
        _ => unreachable!(),
    };

    let new_body = format!(
        "{{
            let runtime = {builder};
            runtime.block_on(async move {{ {body} }});
        }}"
    );

    let Ok(stream) = new_body.parse::<TokenStream>() else {
        return utils::compile_error("#[awaitall::test] could not rewrite the test body");
    };
    tokens[pos] = TokenTree::Group(Group::new(Delimiter::Brace, stream));

    let mut result: Vec<TokenTree> = "#[::core::prelude::v1::test]"
        .parse::<TokenStream>()
        .unwrap_or_default()
        .into_iter()
        .collect();
    result.extend(tokens);

    result.into_iter().collect()
}
