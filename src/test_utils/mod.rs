pub(crate) mod fakes;
pub(crate) mod html;

pub(crate) use fakes::{
    CoordinatorCall, FakeGateway, FakeTransport, GatewayCall, Harness, ScriptedConfirm,
};
pub(crate) use html::{
    assert_valid_html, count_matches, option_pairs, parse_html_fragment, select_texts,
};
