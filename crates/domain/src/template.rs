//! # テンプレート
//!
//! HTML テンプレート中の `{{ key }}` プレースホルダを置換する。
//!
//! テンプレートエンジンは使わない。`{{ ` + キー + ` }}`（前後ちょうど 1 つの空白）を
//! リテラルとして探し、コンテキストにあるキーだけを値に置き換える。
//! 置換後の値は再走査しないため、値に含まれる `{{ ... }}` はそのまま残る。

use std::collections::BTreeMap;

use crate::recipient::Recipient;

const OPEN: &str = "{{ ";
const CLOSE: &str = " }}";

/// 名前付きテンプレート
///
/// バッチごとに 1 回取得し、全受信者で使い回す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name:    String,
    content: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// コンテキストでレンダリングする
    pub fn render(&self, context: &RenderContext) -> String {
        render(&self.content, context)
    }
}

/// プレースホルダ名から置換値へのマッピング
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受信者からコンテキストを構築する（`name` → 表示名）
    pub fn for_recipient(recipient: &Recipient) -> Self {
        Self::new().with("name", recipient.name())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// テンプレートのプレースホルダを置換する
///
/// 未知のキーのプレースホルダは変更せずに残す。
pub fn render(template: &str, context: &RenderContext) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let value = after_open
            .find(CLOSE)
            .and_then(|end| context.get(&after_open[..end]).map(|value| (end, value)));

        match value {
            Some((end, value)) => {
                output.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            // 一致しない場合は開始記号だけ出力し、その直後から探索を続ける
            None => {
                output.push_str(OPEN);
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn context() -> RenderContext {
        RenderContext::new().with("name", "Hanako")
    }

    #[test]
    fn test_プレースホルダを置換する() {
        assert_eq!(render("Hi {{ name }}", &context()), "Hi Hanako");
    }

    #[test]
    fn test_同じキーの全出現を置換する() {
        assert_eq!(
            render("<p>{{ name }}</p><b>{{ name }}</b>", &context()),
            "<p>Hanako</p><b>Hanako</b>"
        );
    }

    #[test]
    fn test_未知のキーはそのまま残す() {
        assert_eq!(
            render("Hi {{ name }}, see {{ link }}", &context()),
            "Hi Hanako, see {{ link }}"
        );
    }

    #[rstest]
    #[case("{{name}}")]
    #[case("{{  name }}")]
    #[case("{{ name}}")]
    #[case("{{ name }")]
    fn test_空白が1つでない形は置換しない(#[case] template: &str) {
        assert_eq!(render(template, &context()), template);
    }

    #[test]
    fn test_置換後の値は再走査しない() {
        let context = RenderContext::new()
            .with("name", "{{ greeting }}")
            .with("greeting", "Hello");

        assert_eq!(render("{{ name }}", &context), "{{ greeting }}");
    }

    #[test]
    fn test_開始記号が重なっても後ろのプレースホルダを置換する() {
        assert_eq!(render("{{ {{ name }}", &context()), "{{ Hanako");
    }

    #[test]
    fn test_受信者の表示名がコンテキストになる() {
        let recipient = Recipient::from_line("a@x.com,Alice");
        let template = Template::new("welcome_email.html", "Hi {{ name }}");

        assert_eq!(
            template.render(&RenderContext::for_recipient(&recipient)),
            "Hi Alice"
        );
    }

    #[test]
    fn test_日本語を含むテンプレートでも境界を壊さない() {
        let context = RenderContext::new().with("name", "田中");
        assert_eq!(render("こんにちは {{ name }} さん", &context), "こんにちは 田中 さん");
    }
}
