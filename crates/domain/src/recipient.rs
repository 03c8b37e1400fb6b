//! # 受信者
//!
//! 通知の宛先となる受信者と、受信者リストのパースを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Recipient`] | 受信者 | メールアドレスと表示名の組 |
//! | [`RecipientFormat`] | 受信者リスト形式 | `email[,name]` 行形式 / ヘッダー付き CSV |
//!
//! ## 設計方針
//!
//! - **パース時に確定**: 受信者は 1 行（1 レコード）から生成され、以後変更されない
//! - **検証は呼び出し側が選ぶ**: パースはアドレス形式を検証しない。
//!   イベント駆動の経路は [`is_valid_email`] で不正なアドレスをスキップし、
//!   CLI の経路は検証しない
//! - **順序保持**: 出力順は入力順と一致する（重複除去・ソートなし）

use std::sync::LazyLock;

use regex::Regex;

use crate::DomainError;

/// 表示名が与えられなかった場合の既定値
pub const DEFAULT_RECIPIENT_NAME: &str = "Valued Customer";

/// CSV ヘッダーのメールアドレス列名
const EMAIL_COLUMN: &str = "email";

/// CSV ヘッダーの表示名列名
const NAME_COLUMN: &str = "name";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
        .expect("メールアドレスの正規表現は固定値")
});

/// メールアドレスの形式を検証する
///
/// ローカル部 `[a-zA-Z0-9_.+-]+`、`@`、ドメインラベル、`.`、TLD 部の順に
/// 両端アンカーで一致するかを判定する。
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 受信者
///
/// メールアドレスと表示名の組。表示名が空または未指定の場合は
/// [`DEFAULT_RECIPIENT_NAME`] になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    email: String,
    name:  String,
}

impl Recipient {
    /// 受信者を作成する
    pub fn new(email: impl Into<String>, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_RECIPIENT_NAME);

        Self {
            email: email.into().trim().to_string(),
            name:  name.to_string(),
        }
    }

    /// `email[,name]` 形式の 1 行から受信者を作成する
    ///
    /// 3 列目以降は無視する。
    pub fn from_line(line: &str) -> Self {
        let mut fields = line.split(',');
        let email = fields.next().unwrap_or_default();
        Self::new(email, fields.next())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// メールアドレスが [`is_valid_email`] を満たすか
    pub fn has_valid_email(&self) -> bool {
        is_valid_email(&self.email)
    }
}

/// 受信者リストの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientFormat {
    /// 1 行 1 受信者の `email[,name]` 形式
    Lines,
    /// `email` 列を含むヘッダー行付き CSV
    CsvWithHeader,
}

impl RecipientFormat {
    /// テキストの形式を判定する
    ///
    /// 最初の空でない行に `email` という列名があればヘッダー付き CSV とみなす。
    pub fn detect(text: &str) -> Self {
        let first_line = text.lines().find(|line| !line.trim().is_empty());

        let has_email_header = first_line
            .map(|line| {
                split_csv_records(line)
                    .into_iter()
                    .flatten()
                    .any(|field| is_column(&field, EMAIL_COLUMN))
            })
            .unwrap_or(false);

        if has_email_header {
            Self::CsvWithHeader
        } else {
            Self::Lines
        }
    }
}

/// 形式を自動判定して受信者リストをパースする
pub fn parse_recipients(text: &str) -> Result<Vec<Recipient>, DomainError> {
    match RecipientFormat::detect(text) {
        RecipientFormat::Lines => Ok(parse_lines(text)),
        RecipientFormat::CsvWithHeader => parse_csv(text),
    }
}

/// `email[,name]` 行形式の受信者リストをパースする
///
/// 空行は読み飛ばす。アドレス形式の検証は行わない。
pub fn parse_lines(text: &str) -> Vec<Recipient> {
    text.trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Recipient::from_line)
        .collect()
}

/// ヘッダー付き CSV の受信者リストをパースする
///
/// ダブルクォートで囲まれたフィールド（カンマ・改行・`""` エスケープを含む）に対応する。
/// `email` 列が空の行もそのまま受信者として返す（検証は [`validate_recipients`]）。
///
/// # エラー
///
/// ヘッダー行に `email` 列がない場合は `DomainError::Validation` を返す。
pub fn parse_csv(text: &str) -> Result<Vec<Recipient>, DomainError> {
    let mut records = split_csv_records(text)
        .into_iter()
        .filter(|record| record.iter().any(|field| !field.trim().is_empty()));

    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };

    let email_index = header
        .iter()
        .position(|column| is_column(column, EMAIL_COLUMN))
        .ok_or_else(|| {
            DomainError::Validation("CSV ヘッダーに email 列がありません".to_string())
        })?;
    let name_index = header
        .iter()
        .position(|column| is_column(column, NAME_COLUMN));

    Ok(records
        .map(|record| {
            let email = record.get(email_index).map(String::as_str).unwrap_or_default();
            let name = name_index.and_then(|index| record.get(index)).map(String::as_str);
            Recipient::new(email, name)
        })
        .collect())
}

/// 受信者リストを明示的に検証する
///
/// # エラー
///
/// メールアドレスが空の受信者が 1 件でもあれば `DomainError::Validation` を返す。
pub fn validate_recipients(recipients: &[Recipient]) -> Result<(), DomainError> {
    if let Some(position) = recipients.iter().position(|r| r.email().is_empty()) {
        return Err(DomainError::Validation(format!(
            "メールアドレスは必須です（{}件目）",
            position + 1
        )));
    }
    Ok(())
}

fn is_column(field: &str, column: &str) -> bool {
    field.trim().eq_ignore_ascii_case(column)
}

/// CSV テキストをレコード（フィールドの列）に分割する
fn split_csv_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}
