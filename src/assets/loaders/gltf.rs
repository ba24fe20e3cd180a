//! glTF loading.
//!
//! Two entry points, mirroring the two assets the viewer works with:
//! - [`GltfLoader::load_scene_async`] builds the static scene subtree
//!   (nodes, transforms, meshes) and ignores any animations in the file.
//! - [`GltfLoader::load_clips_async`] extracts animation clips only; the
//!   clips address their target nodes by name and get bound to the already
//!   loaded scene afterwards.
//!
//! Both go through the async asset readers, so sources can be local paths
//! or URLs, and buffers can be external files, GLB chunks, or data URIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use glam::{Quat, Vec3, Vec4};

use crate::animation::clip::{AnimationClip, TargetProperty, Track, TrackData};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::assets::io::AssetReaderVariant;
use crate::errors::{Result, ViewerError};
use crate::scene::{Geometry, Mesh, Node, NodeHandle, Scene};

pub struct GltfLoader;

impl GltfLoader {
    /// Loads the static content of a glTF file into `scene`.
    ///
    /// Returns the handle of a new root node, named after the source file,
    /// that the default scene's roots are attached under.
    pub async fn load_scene_async(source: &str, scene: &mut Scene) -> Result<NodeHandle> {
        Self::load_scene_inner(source, scene)
            .await
            .map_err(|e| ViewerError::StaticAssetLoad {
                uri: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// Loads only the animation clips of a glTF file.
    pub async fn load_clips_async(source: &str) -> Result<Vec<AnimationClip>> {
        Self::load_clips_inner(source)
            .await
            .map_err(|e| ViewerError::AnimationAssetLoad {
                uri: source.to_string(),
                reason: e.to_string(),
            })
    }

    async fn load_scene_inner(source: &str, scene: &mut Scene) -> Result<NodeHandle> {
        let (gltf, buffers) = Self::fetch(source).await?;

        // Shallow pass: create one engine node per glTF node
        let mut node_mapping = Vec::with_capacity(gltf.nodes().count());
        for gltf_node in gltf.nodes() {
            let name = node_name(&gltf_node);
            let mut node = Node::new(name);

            let (translation, rotation, scale) = gltf_node.transform().decomposed();
            node.transform.position = Vec3::from_array(translation);
            node.transform.rotation = Quat::from_array(rotation);
            node.transform.scale = Vec3::from_array(scale);

            node_mapping.push(scene.add_node(node));
        }

        // Meshes: a single primitive attaches to the node itself, multiple
        // primitives become child nodes
        for gltf_node in gltf.nodes() {
            let Some(gltf_mesh) = gltf_node.mesh() else {
                continue;
            };
            let handle = node_mapping[gltf_node.index()];
            let primitives: Vec<_> = gltf_mesh.primitives().collect();
            let single = primitives.len() == 1;

            for (prim_index, primitive) in primitives.into_iter().enumerate() {
                let mesh_name = gltf_mesh
                    .name()
                    .map_or_else(|| format!("Mesh_{}", gltf_mesh.index()), str::to_string);
                let mesh = Self::load_primitive(&primitive, &buffers, &mesh_name)?;
                let mesh_key = scene.add_mesh(mesh);

                if single {
                    if let Some(node) = scene.get_node_mut(handle) {
                        node.mesh = Some(mesh_key);
                    }
                } else {
                    let child = scene.add_node(Node::new(format!("{mesh_name}_{prim_index}")));
                    if let Some(node) = scene.get_node_mut(child) {
                        node.mesh = Some(mesh_key);
                    }
                    scene.attach(handle, child);
                }
            }
        }

        // Hierarchy pass
        for gltf_node in gltf.nodes() {
            let parent = node_mapping[gltf_node.index()];
            for child in gltf_node.children() {
                scene.attach(parent, node_mapping[child.index()]);
            }
        }

        // Root container named after the file
        let stem = AssetReaderVariant::source_filename(source);
        let stem = stem.split('.').next().unwrap_or(stem);
        let root = scene.create_node(stem);

        let default_scene = gltf
            .default_scene()
            .or_else(|| gltf.scenes().next())
            .ok_or_else(|| ViewerError::GltfError("file contains no scene".to_string()))?;
        for scene_root in default_scene.nodes() {
            scene.attach(root, node_mapping[scene_root.index()]);
        }

        Ok(root)
    }

    async fn load_clips_inner(source: &str) -> Result<Vec<AnimationClip>> {
        let (gltf, buffers) = Self::fetch(source).await?;

        let mut clips = Vec::new();
        for anim in gltf.animations() {
            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
                let target = channel.target();
                let node_name = node_name(&target.node());

                let Some(inputs) = reader.read_inputs() else {
                    return Err(ViewerError::GltfError(
                        "animation channel has no input accessor".to_string(),
                    ));
                };
                let times: Vec<f32> = inputs.collect();

                let interpolation = match channel.sampler().interpolation() {
                    gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                    gltf::animation::Interpolation::Step => InterpolationMode::Step,
                    gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let Some(outputs) = reader.read_outputs() else {
                    return Err(ViewerError::GltfError(
                        "animation channel has no output accessor".to_string(),
                    ));
                };

                let track = match outputs {
                    gltf::animation::util::ReadOutputs::Translations(iter) => Track {
                        node_name,
                        target: TargetProperty::Translation,
                        data: TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    },
                    gltf::animation::util::ReadOutputs::Rotations(iter) => Track {
                        node_name,
                        target: TargetProperty::Rotation,
                        data: TrackData::Quaternion(KeyframeTrack::new(
                            times,
                            iter.into_f32().map(Quat::from_array).collect(),
                            interpolation,
                        )),
                    },
                    gltf::animation::util::ReadOutputs::Scales(iter) => Track {
                        node_name,
                        target: TargetProperty::Scale,
                        data: TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    },
                    gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => {
                        log::debug!("skipping morph weight channel for node '{node_name}'");
                        continue;
                    }
                };

                tracks.push(track);
            }

            let name = anim
                .name()
                .map_or_else(|| format!("anim_{}", anim.index()), str::to_string);
            clips.push(AnimationClip::new(name, tracks));
        }

        Ok(clips)
    }

    async fn fetch(source: &str) -> Result<(gltf::Gltf, Vec<Vec<u8>>)> {
        let reader = AssetReaderVariant::from_source(source)?;
        let filename = AssetReaderVariant::source_filename(source);

        let bytes = reader.read_bytes(filename).await?;
        let gltf = gltf::Gltf::from_slice(&bytes)?;
        let buffers = Self::load_buffers(&gltf, &reader).await?;
        Ok((gltf, buffers))
    }

    async fn load_buffers(
        gltf: &gltf::Gltf,
        reader: &AssetReaderVariant,
    ) -> Result<Vec<Vec<u8>>> {
        let mut buffer_data = Vec::new();
        for buffer in gltf.buffers() {
            match buffer.source() {
                gltf::buffer::Source::Bin => {
                    if let Some(blob) = gltf.blob.as_deref() {
                        buffer_data.push(blob.to_vec());
                    } else {
                        return Err(ViewerError::GltfError(
                            "missing GLB binary chunk".to_string(),
                        ));
                    }
                }
                gltf::buffer::Source::Uri(uri) => {
                    if uri.starts_with("data:") {
                        buffer_data.push(decode_data_uri(uri)?);
                    } else {
                        buffer_data.push(reader.read_bytes(uri).await?);
                    }
                }
            }
        }
        Ok(buffer_data)
    }

    fn load_primitive(
        primitive: &gltf::Primitive,
        buffers: &[Vec<u8>],
        name: &str,
    ) -> Result<Mesh> {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| {
                ViewerError::GltfError(format!("primitive of '{name}' has no positions"))
            })?
            .map(Vec3::from_array)
            .collect();

        let normals: Vec<Vec3> = reader
            .read_normals()
            .map(|iter| iter.map(Vec3::from_array).collect())
            .unwrap_or_default();

        let indices: Vec<u32> = reader.read_indices().map_or_else(
            || (0..positions.len() as u32).collect(),
            |iter| iter.into_u32().collect(),
        );

        let base_color = Vec4::from_array(
            primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor(),
        );

        Ok(Mesh::new(name, Geometry::new(positions, normals, indices)).with_base_color(base_color))
    }
}

fn node_name(gltf_node: &gltf::Node) -> String {
    gltf_node
        .name()
        .map_or_else(|| format!("Node_{}", gltf_node.index()), str::to_string)
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .split_once(";base64,")
        .map(|(_, data)| data)
        .ok_or_else(|| ViewerError::DataUriError("only base64 data URIs are supported".into()))?;
    Ok(BASE64_STANDARD.decode(payload)?)
}
