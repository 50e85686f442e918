use super::Messages;

pub const MESSAGES: Messages = Messages {
    untitled: "未命名",
    brand_fallback: "Kalyna 前线笔记",
    search_placeholder: "在文档中搜索",
    search_button: "查找",
    prev_button: "上一个",
    next_button: "下一个",
    clear_button: "清除",
    home_button: "首页",
    print_button: "PDF",
    zoom_in: "放大",
    zoom_out: "缩小",
    about_nav: "关于",
    articles_heading: "文章",
    about_heading: "关于",
    about_empty: "暂无内容。",
    loading: "加载中...",
    match_status_template: "{} / {} 处匹配",
    no_matches: "无匹配",
    pdf_search_hint: "PDF 请用 Ctrl+F 搜索",
    no_articles: "暂无文章。把文档放入 /articles 并更新 /articles/articles.json。",
    manifest_failed: "无法加载 articles/articles.json",
    article_not_found: "该文章 ID 不存在于 articles.json。",
    resource_missing: "中文文档未提供。",
    resource_failed_template: "文档加载失败：{}",
    unsupported_format: "不支持旧版 .doc 文件，请转换为 .docx 或 PDF。",
    lang_badge: "中",
};
