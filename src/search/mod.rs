//! 模拟器可执行文件搜索
//! * ✨根据平台规则，在「安装目录」中找出模拟器的可执行文件
//!  * 🚩输入：平台搜索规则（根目录 + 文件名通配符）
//!  * 🚩输出：唯一的可执行文件路径，或「未找到」

nar_dev_utils::mods! {
    // 名称匹配
    pub pub name_match;
    // 搜索规格
    pub pub search_spec;
    // 平台规则
    pub pub platform;
    // 解析
    pub pub resolver;
}
