// Browser tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use hanzi_stroke::config::{ElementIds, RESET_REVEAL_DELAY_MS, TOAST_TIMEOUT_MS};
use hanzi_stroke::web::{dispatch, launch, show_toast};
use hanzi_stroke::{AppConfig, SAMPLE_HANZI, Toast};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// Minimal stand-in for the hanzi-writer global; counts calls per character.
const WRITER_STUB: &str = r#"
window.__hsCalls = window.__hsCalls || {};
window.HanziWriter = {
  create(el, ch, opts) {
    const hit = (m) => {
      const k = ch + ':' + m;
      window.__hsCalls[k] = (window.__hsCalls[k] || 0) + 1;
    };
    hit('create');
    return {
      animateCharacter() { hit('animateCharacter'); },
      hideCharacter() { hit('hideCharacter'); },
      showCharacter() { hit('showCharacter'); },
      quiz() { hit('quiz'); },
      cancelQuiz() { hit('cancelQuiz'); },
      updateOptions() { hit('updateOptions'); },
      on() {},
    };
  },
};
"#;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

async fn sleep(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn calls(ch: char, method: &str) -> u32 {
    let table = js_sys::Reflect::get(&web_sys::window().unwrap(), &"__hsCalls".into()).unwrap();
    js_sys::Reflect::get(&table, &JsValue::from_str(&format!("{ch}:{method}")))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32
}

/// Insert a page whose element ids all start with `prefix` and return the
/// matching config.
fn mount_page(prefix: &str) -> AppConfig {
    js_sys::eval(WRITER_STUB).unwrap();
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(&format!(
        r#"<input id="{p}-input">
           <button id="{p}-animate"></button><button id="{p}-quiz"></button>
           <button id="{p}-reset"></button>
           <input type="checkbox" id="{p}-outline" checked>
           <input type="checkbox" id="{p}-character" checked>
           <div id="{p}-target"></div><div id="{p}-info"></div>
           <button class="{p}-tile" data-char="春">春</button>"#,
        p = prefix
    ));
    doc.body().unwrap().append_child(&root).unwrap();
    let ids = ElementIds {
        character_input: format!("{prefix}-input"),
        animate_button: format!("{prefix}-animate"),
        quiz_button: format!("{prefix}-quiz"),
        reset_button: format!("{prefix}-reset"),
        show_outline: format!("{prefix}-outline"),
        show_character: format!("{prefix}-character"),
        stroke_info: format!("{prefix}-info"),
        target: format!("{prefix}-target"),
        example_selector: format!(".{prefix}-tile"),
    };
    AppConfig { ids, ..AppConfig::default() }
}

#[wasm_bindgen_test]
fn toast_is_attached_with_kind_class() {
    let doc = document();
    let toast = Toast::error("无法加载汉字，请输入有效的汉字");
    let el = show_toast(&doc, &toast).unwrap();
    assert_eq!(el.class_name(), "message error");
    assert!(el.is_connected());
}

#[wasm_bindgen_test]
async fn toast_removes_itself_after_timeout() {
    let el = show_toast(&document(), &Toast::error("bad")).unwrap();
    sleep(TOAST_TIMEOUT_MS - 500).await;
    assert!(el.is_connected());
    sleep(600).await;
    assert!(!el.is_connected());
}

#[wasm_bindgen_test]
async fn later_toast_does_not_cancel_earlier_one() {
    let doc = document();
    let first = show_toast(&doc, &Toast::info("first")).unwrap();
    sleep(1500).await;
    let second = show_toast(&doc, &Toast::info("second")).unwrap();
    assert!(first.is_connected() && second.is_connected());

    sleep(TOAST_TIMEOUT_MS - 1500 + 100).await;
    assert!(!first.is_connected());
    assert!(second.is_connected());
    assert_eq!(doc.query_selector_all("#hs-toast-keyframes").unwrap().length(), 1);
}

#[wasm_bindgen_test]
async fn reset_reveals_the_character_after_its_delay() {
    let app = launch(mount_page("hs-reset")).unwrap();
    dispatch(&app, |c| {
        c.select_character("秋");
    });
    dispatch(&app, |c| c.reset());
    assert_eq!(calls('秋', "hideCharacter"), 1);
    assert_eq!(calls('秋', "showCharacter"), 0);

    sleep(RESET_REVEAL_DELAY_MS + 100).await;
    assert_eq!(calls('秋', "showCharacter"), 1);
}

#[wasm_bindgen_test]
async fn reveal_for_a_replaced_writer_never_fires() {
    let app = launch(mount_page("hs-stale")).unwrap();
    dispatch(&app, |c| {
        c.select_character("冬");
    });
    dispatch(&app, |c| c.reset());
    dispatch(&app, |c| {
        c.select_character("夏");
    });

    sleep(RESET_REVEAL_DELAY_MS + 100).await;
    assert_eq!(calls('冬', "showCharacter"), 0);
}

#[wasm_bindgen_test]
fn grid_without_container_is_a_no_op() {
    let chars: String = SAMPLE_HANZI.iter().map(|(h, ..)| *h).collect();
    assert!(hanzi_stroke::batch::create_character_grid(&chars, "missing-grid").is_ok());
}
