use serde::Serialize;

use crate::error::{BlogListError, Result};

/// 年份筛选 - 固定的互斥取值集合
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSelection {
    /// 不筛选
    #[default]
    All,
    /// 2023年
    Year2023,
    /// 2022年
    Year2022,
}

impl FilterSelection {
    /// 按钮的展示顺序
    pub const OPTIONS: [FilterSelection; 3] = [
        FilterSelection::All,
        FilterSelection::Year2023,
        FilterSelection::Year2022,
    ];

    /// 筛选值，None 表示不筛选
    pub fn value(self) -> Option<&'static str> {
        match self {
            FilterSelection::All => None,
            FilterSelection::Year2023 => Some("2023"),
            FilterSelection::Year2022 => Some("2022"),
        }
    }

    /// 按钮文字
    pub fn label(self) -> &'static str {
        match self {
            FilterSelection::All => "All Projects",
            FilterSelection::Year2023 => "Projects in 2023",
            FilterSelection::Year2022 => "Projects in 2022",
        }
    }

    /// 从筛选值解析，集合外的值返回错误
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(FilterSelection::All),
            Some(v) => Self::OPTIONS
                .into_iter()
                .find(|option| option.value() == Some(v))
                .ok_or_else(|| BlogListError::UnknownFilter(v.to_string())),
        }
    }

    /// 日期文本是否命中筛选
    ///
    /// 这是对展示文本的子串匹配，不是结构化的年份比较：
    /// 任何包含 "2023" 的日期文本都会命中 `Year2023`。
    pub fn matches(self, date: &str) -> bool {
        match self.value() {
            None => true,
            Some(value) => date.contains(value),
        }
    }
}

/// 筛选按钮描述
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterButtonView {
    /// 按钮文字
    pub label: &'static str,
    /// 点击后回传的筛选值
    pub value: Option<&'static str>,
    /// 是否为当前选中项
    pub active: bool,
    /// 样式类名
    pub class_name: &'static str,
}

/// 筛选控件 - 持有本地选中状态，选中变化时向上回调
#[derive(Debug, Clone, Default)]
pub struct FilterControl {
    active: FilterSelection,
}

impl FilterControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前选中项
    pub fn active(&self) -> FilterSelection {
        self.active
    }

    /// 点击某个按钮：更新本地状态并回调新的筛选值
    pub fn activate<F>(&mut self, selection: FilterSelection, mut on_change: F)
    where
        F: FnMut(FilterSelection),
    {
        self.active = selection;
        on_change(selection);
    }

    /// 渲染三个按钮，选中标记只取决于本地状态
    pub fn buttons(&self) -> Vec<FilterButtonView> {
        FilterSelection::OPTIONS
            .into_iter()
            .map(|option| {
                let active = option == self.active;
                FilterButtonView {
                    label: option.label(),
                    value: option.value(),
                    active,
                    class_name: if active { "button active" } else { "button" },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_fixed_values() {
        assert_eq!(FilterSelection::parse(None).ok(), Some(FilterSelection::All));
        assert_eq!(FilterSelection::parse(Some("2023")).ok(), Some(FilterSelection::Year2023));
        assert_eq!(FilterSelection::parse(Some("2022")).ok(), Some(FilterSelection::Year2022));
        assert!(FilterSelection::parse(Some("2021")).is_err());
        assert!(FilterSelection::parse(Some("")).is_err());
    }

    #[test]
    fn match_is_a_substring_test_on_display_text() {
        assert!(FilterSelection::Year2023.matches("January 05, 2023"));
        assert!(!FilterSelection::Year2023.matches("December 31, 2022"));
        // 子串匹配：任何位置出现都算命中
        assert!(FilterSelection::Year2023.matches("20230"));
        assert!(FilterSelection::All.matches(""));
    }

    #[test]
    fn initial_selection_is_all() {
        let control = FilterControl::new();
        let buttons = control.buttons();

        assert_eq!(control.active(), FilterSelection::All);
        assert_eq!(
            buttons.iter().map(|b| b.label).collect::<Vec<_>>(),
            vec!["All Projects", "Projects in 2023", "Projects in 2022"]
        );
        assert_eq!(buttons.iter().filter(|b| b.active).count(), 1);
        assert!(buttons[0].active);
        assert_eq!(buttons[0].class_name, "button active");
        assert_eq!(buttons[1].class_name, "button");
    }

    #[test]
    fn activate_updates_state_and_invokes_callback_once() {
        let mut control = FilterControl::new();
        let mut received = Vec::new();

        control.activate(FilterSelection::Year2022, |selection| received.push(selection));

        assert_eq!(received, vec![FilterSelection::Year2022]);
        assert_eq!(control.active(), FilterSelection::Year2022);

        let buttons = control.buttons();
        assert!(!buttons[0].active);
        assert!(buttons[2].active);
        assert_eq!(buttons[2].value, Some("2022"));
    }
}
