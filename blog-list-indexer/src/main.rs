use std::path::Path;
use clap::{Arg, ArgAction, Command, value_parser};
use walkdir::WalkDir;

use blog_list::builder::{PageBundleBuilder, DEFAULT_POSTS_PER_PAGE};
use utils_common::SourcePost;

mod extract;

fn main() {
    let matches = Command::new("博客列表分页生成器")
        .version(env!("CARGO_PKG_VERSION"))
        .about("从已渲染的文章页面生成博客列表的分页数据包")
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .value_name("SOURCE_DIR")
            .help("已渲染站点的目录路径")
            .required(true))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .value_name("OUTPUT_DIR")
            .help("分页数据包输出目录路径")
            .required(true))
        .arg(Arg::new("per_page")
            .short('p')
            .long("per-page")
            .value_name("COUNT")
            .help("每页文章数")
            .value_parser(value_parser!(usize))
            .default_value("9"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .action(ArgAction::SetTrue))
        .get_matches();

    // clap 已保证必填参数存在
    let (Some(source_dir), Some(output_dir)) = (
        matches.get_one::<String>("source"),
        matches.get_one::<String>("output"),
    ) else {
        eprintln!("错误: 缺少必填参数");
        std::process::exit(2);
    };
    let per_page = matches.get_one::<usize>("per_page").copied().unwrap_or(DEFAULT_POSTS_PER_PAGE);
    let verbose = matches.get_flag("verbose");

    let source_path = Path::new(source_dir);
    if !source_path.is_dir() {
        eprintln!("错误: 源目录不存在或不是有效目录 '{}'", source_dir);
        std::process::exit(1);
    }

    let output_path = Path::new(output_dir);
    if let Err(e) = std::fs::create_dir_all(output_path) {
        eprintln!("错误: 无法创建输出目录 '{}': {}", output_dir, e);
        std::process::exit(1);
    }

    println!("开始生成分页数据...");
    println!("源目录: {}", source_dir);
    println!("输出目录: {}", output_dir);

    match generate_pages(source_path, output_path, per_page, verbose) {
        Ok(pages) => println!("分页数据生成成功！共 {} 页", pages),
        Err(e) => {
            eprintln!("错误: 分页数据生成失败: {}", e);
            std::process::exit(1);
        }
    }
}

/// 扫描文章并写出所有分页数据包
fn generate_pages(source_dir: &Path, output_dir: &Path, per_page: usize, verbose: bool) -> Result<usize, String> {
    let start_time = std::time::Instant::now();

    println!("扫描HTML文件...");
    let (posts, total_files) = scan_html_files(source_dir, verbose)?;
    println!("扫描完成。共 {} 个HTML文件，找到 {} 篇文章。", total_files, posts.len());

    if posts.is_empty() {
        return Err("没有找到文章".to_string());
    }

    let mut builder = PageBundleBuilder::new(per_page);
    for post in posts {
        builder.add_post(post);
    }

    let pages = builder.save_pages(output_dir)?;

    println!("耗时: {:.2}秒", start_time.elapsed().as_secs_f32());
    Ok(pages)
}

/// 递归扫描HTML文件，返回文章和HTML文件总数
fn scan_html_files(dir_path: &Path, verbose: bool) -> Result<(Vec<SourcePost>, usize), String> {
    let mut posts = Vec::new();
    let mut total_files = 0;

    for entry in WalkDir::new(dir_path) {
        let entry = entry.map_err(|e| format!("遍历目录时出错: {}", e))?;

        if !entry.file_type().is_file() || entry.path().extension().map_or(true, |ext| ext != "html") {
            continue;
        }
        total_files += 1;

        match extract::extract_post_from_file(entry.path(), dir_path) {
            Ok(Some(post)) => {
                if verbose {
                    println!("处理: {}", entry.path().display());
                }
                posts.push(post);
            }
            Ok(None) => {}
            Err(err) => {
                if verbose {
                    eprintln!("解析文件时出错 {}: {}", entry.path().display(), err);
                }
            }
        }
    }

    Ok((posts, total_files))
}
